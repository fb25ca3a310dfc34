pub use self::{configuration::*, moves::*};

pub(crate) mod configuration;
pub(crate) mod moves;
