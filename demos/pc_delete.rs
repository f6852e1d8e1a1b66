use std::env;

mod pc_utils;
use pc_utils::{open_sensor, print_ports};

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => print_ports(),
        3 if args[2] == "all" => empty(args[1].as_str()),
        3 => delete_id(args[1].as_str(), args[2].parse::<u16>().unwrap()),
        _ => panic!("Usage: pc_delete [port_name location|all]"),
    };
}

fn delete_id(port_name: &str, location: u16) {
    let mut sensor = open_sensor(port_name);
    match sensor.delete_model(location) {
        Ok(()) => println!("Deleted location {}", location),
        Err(e) => panic!("Error: {:#?}", e),
    }
}

fn empty(port_name: &str) {
    let mut sensor = open_sensor(port_name);
    match sensor.empty_database() {
        Ok(()) => println!("Library emptied"),
        Err(e) => panic!("Error: {:#?}", e),
    }
}
