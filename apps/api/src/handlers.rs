pub mod health;
pub mod members;
pub mod teams;

#[cfg(test)]
pub(crate) mod test_support;
