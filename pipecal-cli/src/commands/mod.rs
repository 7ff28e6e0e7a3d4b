pub mod new;
pub mod stages;
pub mod view;
