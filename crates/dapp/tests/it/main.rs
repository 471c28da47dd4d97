mod connect;
mod memos;
mod subscription;
mod tip;
mod utils;
