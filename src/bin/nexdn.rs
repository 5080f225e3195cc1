//! NEXRAD Downloader.
//!
//! Browse the NEXRAD level 2 archive on AWS and download scans from it.

use std::error::Error;

use clap::{Arg, ArgMatches, SubCommand};
use nexrad_aws_data::{parse_time_arg, CommonCmdLineArgs, RadarArchive, ScanRecord};

fn main() {
    env_logger::init();

    if let Err(ref e) = run() {
        println!("error: {}", e);

        let mut cause = e.source();
        while let Some(err) = cause {
            println!("caused by: {}", err);
            cause = err.source();
        }

        ::std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let date_args = |cmd: clap::App<'static, 'static>, levels: &[&'static str]| {
        levels
            .iter()
            .enumerate()
            .fold(cmd, |cmd, (i, level)| {
                cmd.arg(
                    Arg::with_name(*level)
                        .index(i as u64 + 1)
                        .required(true)
                        .takes_value(true),
                )
            })
    };

    let app = CommonCmdLineArgs::new_app("nexdn", "Browse and download NEXRAD level 2 scans.")
        .subcommand(SubCommand::with_name("years").about("List the years in the archive."))
        .subcommand(date_args(
            SubCommand::with_name("months").about("List the months in a year."),
            &["year"],
        ))
        .subcommand(date_args(
            SubCommand::with_name("days").about("List the days in a month."),
            &["year", "month"],
        ))
        .subcommand(date_args(
            SubCommand::with_name("radars").about("List the radars with data on a day."),
            &["year", "month", "day"],
        ))
        .subcommand(date_args(
            SubCommand::with_name("scans").about("List the scans for a radar on a day."),
            &["year", "month", "day", "radar"],
        ))
        .subcommand(
            date_args(
                SubCommand::with_name("range")
                    .about("List, and optionally download, the scans for a radar in a time range."),
                &["radar", "start", "end"],
            )
            .arg(
                Arg::with_name("download")
                    .short("d")
                    .long("download")
                    .help("Download the scans into the root directory."),
            )
            .arg(
                Arg::with_name("keep-folders")
                    .short("k")
                    .long("keep-folders")
                    .help("Keep the year/month/day/radar folders of the archive below root."),
            ),
        );

    let (common_args, matches) = CommonCmdLineArgs::matches(app);
    let arch = RadarArchive::connect_with(common_args.config())?;

    let value = |sub_args: &ArgMatches, name: &str| -> String {
        sub_args.value_of(name).unwrap_or_default().to_owned()
    };

    match matches.subcommand() {
        ("years", Some(_)) => print_all(&arch.list_years()?),
        ("months", Some(sub)) => print_all(&arch.list_months(&value(sub, "year"))?),
        ("days", Some(sub)) => {
            print_all(&arch.list_days(&value(sub, "year"), &value(sub, "month"))?)
        }
        ("radars", Some(sub)) => print_all(&arch.list_radars(
            &value(sub, "year"),
            &value(sub, "month"),
            &value(sub, "day"),
        )?),
        ("scans", Some(sub)) => print_scans(&arch.list_scans(
            &value(sub, "year"),
            &value(sub, "month"),
            &value(sub, "day"),
            &value(sub, "radar").to_uppercase(),
        )?),
        ("range", Some(sub)) => {
            let start = parse_time_arg(&value(sub, "start"))?;
            let end = parse_time_arg(&value(sub, "end"))?;

            let scans = arch.query_range(&value(sub, "radar"), start, end)?;

            if sub.is_present("download") {
                let local = arch.download(
                    &scans,
                    common_args.root(),
                    sub.is_present("keep-folders"),
                )?;
                for lf in local {
                    println!("{}", lf.path().display());
                }
            } else {
                print_scans(&scans);
            }
        }
        _ => println!("{}", matches.usage()),
    }

    Ok(())
}

fn print_all(vals: &[String]) {
    for val in vals {
        println!("{}", val);
    }
}

fn print_scans(scans: &[ScanRecord]) {
    for scan in scans {
        println!("{}  {}", scan.scan_time().format("%Y-%m-%d %H:%M:%SZ"), scan);
    }
}
