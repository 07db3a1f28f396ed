//! Smoke executable for `parcel_core`.
//!
//! Usage: `parcel_cli [DB_PATH]`. Without a path the scenario runs against an
//! in-memory database. Set `PARCEL_LOG_DIR` to an absolute path to enable
//! file logging.

use parcel_core::{
    default_log_level, init_logging, open_db, open_db_in_memory, ParcelService, RepoError,
    SqliteParcelRepository,
};
use std::error::Error;
use std::process::ExitCode;

const DEMO_CLIENT: i64 = 1;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("PARCEL_LOG_DIR") {
        init_logging(default_log_level(), &log_dir)?;
    }

    let conn = match std::env::args().nth(1) {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let service = ParcelService::new(SqliteParcelRepository::try_new(&conn)?);

    println!("parcel_core version={}", parcel_core::core_version());

    let parcel = service.register(DEMO_CLIENT, "Elm St 5")?;
    println!(
        "registered number={} client={} created_at={}",
        parcel.number, parcel.client, parcel.created_at
    );

    service.change_address(parcel.number, "Oak St 9")?;
    println!("address changed number={}", parcel.number);

    let status = service.next_status(parcel.number)?;
    println!("status advanced number={} status={status}", parcel.number);

    match service.change_address(parcel.number, "X") {
        Err(RepoError::NotRegistered(number)) => {
            println!("address frozen number={number}");
        }
        Err(err) => return Err(err.into()),
        Ok(()) => return Err("address change after dispatch was accepted".into()),
    }

    if service.delete(parcel.number)? {
        return Err("delete after dispatch removed the parcel".into());
    }
    let kept = service.get(parcel.number)?;
    println!(
        "delete skipped number={} status={} address={}",
        kept.number, kept.status, kept.address
    );

    for item in service.client_parcels(DEMO_CLIENT)? {
        println!(
            "client={} number={} status={} address={}",
            item.client, item.number, item.status, item.address
        );
    }

    Ok(())
}
