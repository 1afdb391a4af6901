pub mod join;
pub mod membership;

#[cfg(test)]
mod test_client;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logger() {
    let _ = kms_core::ext::init_logger(tracing::Level::DEBUG);
}
