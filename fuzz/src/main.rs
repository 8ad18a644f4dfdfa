//! AFL persistent-mode fuzz target for the queue-file decoder.
unsafe extern "C" {
    fn __AFL_LOOP(cnt: u32) -> i32;
}
use std::io::{self, Read};

use rushq::queue::QueueFile;

/// Upper bound on testcase size; queue files are small in practice.
const MAX_INPUT: usize = 1024 * 1024;

fn main() {
    // Allocate the buffer once so persistent mode does not grow it
    // indefinitely.
    let mut data = Vec::with_capacity(MAX_INPUT);
    loop {
        if unsafe { __AFL_LOOP(1000) } == 0 {
            break;
        }
        data.clear();
        // Bound the read so a runaway testcase cannot allocate without
        // limit. `take` stops at the configured maximum.
        if io::stdin()
            .take(MAX_INPUT as u64)
            .read_to_end(&mut data)
            .is_err()
        {
            return;
        }

        // Decode errors are expected on malformed input; only panics and
        // crashes are of interest here.
        QueueFile::decode(&data).ok();
    }
}
