//! Grows a small tree by alternating branch creation with retreats toward the
//! root, then prints it.
//!
//! Set `RUST_LOG=trace` to follow every cursor movement.
use std::io::{self, Write};

use log::{error, info};
use treezipper::{StepError, Zipper};

const STEPS: i32 = 26;
const CYCLE: i32 = 6;
const RETREAT: usize = 5;

fn grow(zipper: &mut Zipper<i32>) -> Result<(), StepError> {
    for i in 0..STEPS {
        if i % CYCLE == CYCLE - 1 {
            zipper.step_back_n(RETREAT)?;
        } else {
            zipper.create_branch(i);
        }
    }

    Ok(())
}

fn main() -> io::Result<()> {
    env_logger::init();

    let mut zipper = Zipper::with_capacity(STEPS as usize + 1, -1);

    match grow(&mut zipper) {
        Ok(()) => info!("grew {} nodes", zipper.len()),
        Err(err) => error!("{}", err),
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    zipper.print_tree(&mut out)?;
    out.flush()
}
