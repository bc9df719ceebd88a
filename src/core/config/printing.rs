use crate::core::config::data::Config;
use crate::core::constants::DEFAULT_SERVER_URL;

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.server {
            Some(server) => println!("  server: {server}"),
            None => println!("  server: (unset, using {DEFAULT_SERVER_URL})"),
        }
        match &self.username {
            Some(username) => println!("  username: {username}"),
            None => println!("  username: (unset)"),
        }
    }
}
