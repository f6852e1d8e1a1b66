use std::env;
use zfm_fingerprint::Error;

mod pc_utils;
use pc_utils::{capture_into, open_sensor, print_ports};

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => print_ports(),
        2 => run_test(args[1].as_str()),
        _ => panic!("Usage: pc_fingerprint_search [port_name]"),
    };
}

fn run_test(port_name: &str) {
    let mut sensor = open_sensor(port_name);

    println!("1. Acquiring image");
    capture_into(&mut sensor, 1);

    println!("2. Searching");
    match sensor.search() {
        Ok(result) => println!("Match at location {} (score {})", result.page_id, result.score),
        Err(Error::NoMatch) => println!("No match"),
        Err(e) => panic!("Error: {:#?}", e),
    };
}
