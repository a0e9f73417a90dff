use std::thread::sleep;
use std::time::Duration;

use aaplink::{open, AdvancedRemote};

const TTY: &str = "/dev/ttyUSB0";

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| TTY.into());
    let serial_port = open(path).expect("Failed to open serial port.");

    let mut remote = AdvancedRemote::new(serial_port);
    remote.set_player_name_handler(|name| println!("Player name: {name}"));
    remote.set_time_and_status_handler(|length, elapsed, status| {
        println!("{elapsed} / {length} ms ({status})");
    });

    remote.enable().expect("Failed to switch to advanced mode.");
    remote
        .get_player_name()
        .expect("Failed to request player name.");
    remote
        .get_time_and_status()
        .expect("Failed to request time and status.");

    loop {
        remote.poll().expect("I/O error while polling.");
        sleep(Duration::from_millis(1));
    }
}
