use std::sync::Arc;
use std::thread;

use crossbeam_channel::unbounded;
use shared_resources::config::Config;

use crate::utilities::cabin::Cabin;
use crate::utilities::debug;

pub mod doors;
pub mod fsm;
pub mod io;

pub fn run(config: Config) -> std::io::Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    // READ TOP FLOOR
    let top_floor = match config.elevator.top_floor {
        Some(top_floor) => top_floor,
        None => match io::read_top_floor(&mut input, &mut output)? {
            Some(top_floor) => top_floor,
            None => return Ok(()),
        },
    };

    // INITIALIZE CHANNELS
    let (log_tx, log_rx) = unbounded();
    let (status_tx, status_rx) = unbounded();

    let cabin = Cabin::new(top_floor, config.timing, log_tx, status_tx)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let cabin = Arc::new(cabin);

    // INITIALIZE THREAD FOR STATUS DISPLAY
    debug::reserve(&mut output)?;
    let debug_handle = thread::Builder::new().name("debug".to_string()).spawn(move || {
        if let Err(e) = debug::main(log_rx, status_rx) {
            tracing::error!(error = %e, "status display failed");
        }
    })?;

    // INITIALIZE THREAD FOR STATE MACHINE
    let fsm_handle = {
        let cabin = cabin.clone();
        thread::Builder::new().name("fsm".to_string()).spawn(move || cabin.run())?
    };

    // READ OPERATOR INPUT UNTIL EXIT
    let result = io::main(&cabin, input, output);
    cabin.stop();

    if fsm_handle.join().is_err() {
        tracing::error!("service loop panicked");
    }
    // last sender handles go with the cabin, which ends the display thread
    drop(cabin);
    if debug_handle.join().is_err() {
        tracing::error!("status display panicked");
    }

    println!("STOPPING PROGRAM...");
    result
}
