pub mod http_client;
pub mod wire;

#[cfg(test)]
mod test_server;
