use std::env;

mod pc_utils;
use pc_utils::{open_sensor, print_ports};

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => print_ports(),
        2 => run_test(args[1].as_str()),
        _ => panic!("Usage: pc_selftest [port_name]"),
    };
}

fn run_test(port_name: &str) {
    let mut sensor = open_sensor(port_name);

    println!("1. Reading system parameters");
    match sensor.read_system_parameters() {
        Ok(params) => {
            println!("{:#?}", params);
            println!("Password ok: {}", params.password_ok());
            println!("Baud rate: {}", params.baud_rate());
        }
        Err(e) => panic!("Error: {:#?}", e),
    };

    println!("2. Counting templates");
    match sensor.template_count() {
        Ok(count) => println!("{} templates stored", count),
        Err(e) => panic!("Error: {:#?}", e),
    };
}
