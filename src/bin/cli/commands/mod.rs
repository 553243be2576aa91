pub mod add;
pub mod dedup;
pub mod edit;
pub mod list;
pub mod ls;
pub mod new;
pub mod quiz;
pub mod rm;
