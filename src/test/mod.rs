mod config;
mod loader;
