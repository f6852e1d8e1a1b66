use std::env;

mod pc_utils;
use pc_utils::{capture_into, open_sensor, print_ports};

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => print_ports(),
        2 => print_next_template_number(args[1].as_str()),
        3 => enroll_to_id(args[1].as_str(), args[2].parse::<u16>().unwrap()),
        _ => panic!("Usage: pc_enrollment [port_name] [location]"),
    };
}

fn print_next_template_number(port_name: &str) {
    let mut sensor = open_sensor(port_name);
    match sensor.template_count() {
        Ok(count) => println!("Next free location (if stored in order): {}", count),
        Err(e) => panic!("Error: {:#?}", e),
    };
}

fn enroll_to_id(port_name: &str, location: u16) {
    let mut sensor = open_sensor(port_name);

    println!("1. Place a finger on the sensor");
    capture_into(&mut sensor, 1);

    println!("2. Lift the finger");
    while sensor.capture_image().is_ok() {}

    println!("3. Place the same finger again");
    capture_into(&mut sensor, 2);

    println!("4. Creating model");
    if let Err(e) = sensor.create_model() {
        panic!("Could not merge the two images: {:#?}", e);
    }

    println!("5. Storing at location {}", location);
    match sensor.store_model(location) {
        Ok(()) => println!("Enrolled."),
        Err(e) => panic!("Error: {:#?}", e),
    };
}
