pub mod vendor_server;
