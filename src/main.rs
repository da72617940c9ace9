//! The interactive lookup tool.

use dnslookup::base::iana::Rtype;
use dnslookup::base::{Name, Record};
use dnslookup::resolv::{Node, ResolvConf, Resolver};
use std::io::{self, BufRead, IsTerminal, Write};
use std::net::IpAddr;
use std::process::exit;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing based logging. Override with env var RUST_LOG,
    // e.g. RUST_LOG=debug.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .try_init()
        .ok();

    let mut args = std::env::args().skip(1);
    let server = match (args.next(), args.next()) {
        (Some(server), None) => server,
        _ => {
            eprintln!("Invalid call. Usage:");
            eprintln!("\tdnslookup rootServer");
            eprintln!(
                "where rootServer is the IP address (in dotted form) of \
                 the root DNS server to start the search at."
            );
            exit(1);
        }
    };
    let server = match IpAddr::from_str(&server) {
        Ok(server) => server,
        Err(err) => {
            eprintln!("Invalid root server ({}).", err);
            exit(1);
        }
    };
    println!("Root DNS server is: {}", server);

    let mut resolver = match Resolver::new(ResolvConf::new(server)) {
        Ok(resolver) => resolver,
        Err(err) => {
            eprintln!("Failed to open socket: {}", err);
            exit(1);
        }
    };

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    prompt(interactive);
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };

        // Ignore anything beyond a comment character as well as
        // leading and trailing spaces.
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            prompt(interactive);
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();

        match words[0].to_ascii_lowercase().as_str() {
            "quit" | "exit" => break,
            "server" => {
                if words.len() == 2 {
                    match IpAddr::from_str(words[1]) {
                        Ok(server) => {
                            resolver.set_server(server);
                            println!("Root DNS server is now: {}", server);
                        }
                        Err(err) => {
                            println!("Invalid root server ({}).", err);
                        }
                    }
                } else {
                    println!("Invalid call. Format:\n\tserver IP");
                }
            }
            "trace" => {
                match words.get(1).map(|s| s.to_ascii_lowercase()).as_deref()
                {
                    Some("on") if words.len() == 2 => {
                        resolver.set_verbose(true);
                        println!("Verbose tracing is now: ON");
                    }
                    Some("off") if words.len() == 2 => {
                        resolver.set_verbose(false);
                        println!("Verbose tracing is now: OFF");
                    }
                    _ => {
                        eprintln!("Invalid call. Format:\n\ttrace on|off");
                    }
                }
            }
            "lookup" | "l" => {
                if let Some((name, rtype)) = parse_lookup(&words) {
                    lookup(&mut resolver, name, rtype);
                }
            }
            "dump" => {
                resolver
                    .cache()
                    .for_each(|node, records| print_results(node, records));
            }
            _ => {
                eprintln!("Invalid command. Valid commands are:");
                eprintln!("\tlookup fqdn [type]");
                eprintln!("\ttrace on|off");
                eprintln!("\tserver IP");
                eprintln!("\tdump");
                eprintln!("\tquit");
            }
        }
        prompt(interactive);
    }
    println!("Goodbye!");
}

/// Prints the prompt when talking to a terminal.
fn prompt(interactive: bool) {
    if interactive {
        print!("DNSLOOKUP> ");
        io::stdout().flush().ok();
    }
}

/// Parses the arguments of the lookup command.
///
/// Complaints go directly to the user; `None` means the command is not to
/// be run.
fn parse_lookup(words: &[&str]) -> Option<(Name, Rtype)> {
    let rtype = match words.len() {
        2 => Rtype::A,
        3 => match Rtype::from_str(words[2]) {
            Ok(rtype) => rtype,
            Err(_) => {
                eprintln!(
                    "Invalid query type. Must be one of:\n\
                     \tA, AAAA, NS, MX, CNAME"
                );
                return None;
            }
        },
        _ => {
            eprintln!("Invalid call. Format:\n\tlookup hostName [type]");
            return None;
        }
    };
    match Name::from_str(words[1]) {
        Ok(name) => Some((name, rtype)),
        Err(err) => {
            eprintln!("Invalid host name ({}).", err);
            None
        }
    }
}

/// Finds all results for a node and prints them on standard output.
fn lookup(resolver: &mut Resolver, name: Name, rtype: Rtype) {
    let node = Node::new(name, rtype);
    match resolver.resolve(&node) {
        Ok(results) => print_results(&node, &results),
        Err(err) => {
            eprintln!("{}.", err);
            print_results(&node, &[]);
        }
    }
}

/// Prints the result of a lookup.
///
/// An empty result set prints a single placeholder line with a TTL of -1.
fn print_results(node: &Node, results: &[Record]) {
    if results.is_empty() {
        println!(
            "{:<30} {:<5} {:<8} {}",
            node.name().to_string(),
            node.rtype().to_string(),
            -1,
            "0.0.0.0",
        );
    }
    for record in results {
        println!(
            "{:<30} {:<5} {:<8} {}",
            node.name().to_string(),
            node.rtype().to_string(),
            record.ttl(),
            record.data(),
        );
    }
}
