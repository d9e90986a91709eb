// tldr ::: background job worker
use std::time::Duration;

fn run() {
    // *todo ::: drain the queue before shutdown so that in-flight jobs are not lost on deploy
    loop {}
}

















// tldr ::: a second summary that does not belong here
fn idle(_d: Duration) {}
