pub(crate) mod evolution;
pub(crate) mod health;
pub(crate) mod meta;
pub(crate) mod metrics;
pub(crate) mod paths;
