use clap::{Arg, Command};
use mb1r2t_driver::{open_port, poll_available, StreamDecoder};
use std::time::{Duration, Instant};

const CAPTURE_SECONDS: u64 = 5;
const MAX_PACKETS: usize = 10;
const MAX_READINGS_SHOWN: usize = 15;

fn get_port_name() -> String {
    let matches = Command::new("MB-1R2T packet dump.")
        .about("Captures a few seconds of the stream and prints decoded packets.")
        .disable_version_flag(true)
        .arg(
            Arg::new("port")
                .help("The device path to a serial port")
                .use_value_delimiter(false)
                .required(true),
        )
        .get_matches();

    let port_name: &String = matches.get_one("port").unwrap();
    port_name.to_string()
}

fn main() {
    env_logger::init();
    let port_name = get_port_name();
    let mut port = open_port(&port_name).unwrap();

    println!("Reading data for {CAPTURE_SECONDS} seconds...");
    let mut decoder = StreamDecoder::new();
    let deadline = Instant::now() + Duration::from_secs(CAPTURE_SECONDS);
    while Instant::now() < deadline {
        match poll_available(&mut port) {
            Ok(chunk) if chunk.is_empty() => std::thread::sleep(Duration::from_millis(5)),
            Ok(chunk) => decoder.feed(&chunk),
            Err(e) => {
                log::error!("read failed: {e}");
                break;
            }
        }
    }

    let mut packet_num = 0;
    while let Some(frame) = decoder.next_frame() {
        packet_num += 1;
        println!("\nPacket #{packet_num}");
        println!("  Sensor type:  0x{:02X}", frame.sensor_type);
        println!("  Measurements: {}", frame.readings.len());
        println!("  Start angle:  {:.2}", frame.start_angle_degrees);
        println!("  End angle:    {:.2}", frame.end_angle_degrees);
        for (i, measurement) in frame.measurements().take(MAX_READINGS_SHOWN).enumerate() {
            println!(
                "    [{i:2}] Quality: {:3}  Distance: {:5} mm  Angle: {:6.2}",
                measurement.quality, measurement.distance_mm, measurement.angle_degrees,
            );
        }
        if packet_num >= MAX_PACKETS {
            println!("\n... showing first {MAX_PACKETS} packets");
            break;
        }
    }
}
