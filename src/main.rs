//! caskdb - Bitcask-Style Key-Value Storage Engine
//! Interactive shell over a cask rooted at ./data.

use std::io::{self, BufRead, Write};

use caskdb::config::Config;
use caskdb::engine::Cask;
use caskdb::error::CaskError;

fn main() {
    env_logger::init();

    println!();
    println!("  caskdb - append-only key-value store");
    println!();
    println!("  Commands:");
    println!("    set <key> <value>  - Store a key-value pair");
    println!("    get <key>          - Retrieve a value by key");
    println!("    del <key>          - Delete a key");
    println!("    keys               - List all live keys");
    println!("    info               - Show store statistics");
    println!("    exit               - Shutdown");
    println!();

    let config = Config::default();
    let mut cask = match Cask::open(config) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("[ERROR] Failed to open cask: {}", err);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("caskdb> ");
        stdout.flush().unwrap();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap() == 0 {
            break; // EOF
        }

        let parts: Vec<&str> = line.trim().split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "set" | "put" => {
                if parts.len() < 3 {
                    println!("  Usage: set <key> <value>");
                    continue;
                }
                let key = parts[1].as_bytes().to_vec();
                let value = parts[2..].join(" ").as_bytes().to_vec();
                match cask.put(key, value) {
                    Ok(()) => println!("  OK"),
                    Err(e) => println!("  ERROR: {}", e),
                }
            }
            "get" => {
                if parts.len() < 2 {
                    println!("  Usage: get <key>");
                    continue;
                }
                match cask.get(parts[1].as_bytes()) {
                    Ok(value) => match String::from_utf8(value) {
                        Ok(s) => println!("  \"{}\"", s),
                        Err(_) => println!("  <binary data>"),
                    },
                    Err(CaskError::KeyNotFound) => println!("  (nil)"),
                    Err(e) => println!("  ERROR: {}", e),
                }
            }
            "del" | "delete" => {
                if parts.len() < 2 {
                    println!("  Usage: del <key>");
                    continue;
                }
                match cask.delete(parts[1].as_bytes().to_vec()) {
                    Ok(()) => println!("  OK (deleted)"),
                    Err(e) => println!("  ERROR: {}", e),
                }
            }
            "keys" | "list" => {
                let keys = cask.list_keys();
                if keys.is_empty() {
                    println!("  (empty)");
                } else {
                    for key in &keys {
                        println!("  {}", String::from_utf8_lossy(key));
                    }
                    println!("  ({} keys)", keys.len());
                }
            }
            "info" | "stats" => {
                println!("  Live keys: {}", cask.len());
                println!("  Data dir:  {:?}", cask.config().data_dir);
            }
            "exit" | "quit" | "q" => {
                println!("  Shutting down caskdb...");
                break;
            }
            _ => {
                println!("  Unknown command: '{}'. Type 'exit' to quit.", parts[0]);
            }
        }
    }
}
