use std::io::{stdin, stdout, BufReader};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let code = textpipe_cli::run(&args, BufReader::new(stdin()), stdout(), std::io::stderr());
    std::process::exit(code);
}
