use clap::{Arg, ArgAction, Command};
use mb1r2t_driver::{run_driver, RateCounter, ScanAccumulator, StreamDecoder};
use std::time::{Duration, Instant};

fn parse_args() -> (String, bool) {
    let matches = Command::new("MB-1R2T scan watcher.")
        .about("Accumulates a 360 degree scan and prints throughput once per second.")
        .disable_version_flag(true)
        .arg(
            Arg::new("port")
                .help("The device path to a serial port")
                .use_value_delimiter(false)
                .required(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the scan snapshot as JSON instead of a summary line")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let port_name: &String = matches.get_one("port").unwrap();
    (port_name.to_string(), matches.get_flag("json"))
}

fn main() {
    env_logger::init();
    let (port_name, as_json) = parse_args();

    let (_driver_threads, raw_data_rx) = run_driver(&port_name).unwrap();

    let mut decoder = StreamDecoder::new();
    let mut accumulator = ScanAccumulator::new();
    let mut rate = RateCounter::new();
    let mut last_report = Instant::now();

    loop {
        while let Ok(chunk) = raw_data_rx.try_recv() {
            decoder.feed(&chunk);
        }

        let mut accepted = 0u64;
        for measurement in decoder.drain() {
            if accumulator.ingest(measurement) {
                accepted += 1;
            }
        }
        rate.record(accepted);

        if last_report.elapsed() >= Duration::from_secs(1) {
            if as_json {
                let snapshot = &accumulator.snapshot()[..];
                println!("{}", serde_json::to_string(snapshot).unwrap());
            } else {
                println!(
                    "{} pts  {} pts/s  {} pkts  scan #{}",
                    accumulator.occupied(),
                    rate.per_second(),
                    decoder.frames_decoded(),
                    accumulator.rotations(),
                );
            }
            last_report = Instant::now();
        }

        std::thread::sleep(Duration::from_millis(33));
    }
}
