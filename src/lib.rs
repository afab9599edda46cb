pub mod cli;
pub mod credencial;
pub mod qr;
