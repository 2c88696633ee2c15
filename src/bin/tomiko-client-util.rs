use clap::Parser;

fn main() {
    use tomiko_client::util::cli::*;

    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let opts = Options::parse();
    match run_cli_action(opts) {
        Ok(()) => println!("OK!"),
        Err(_) => std::process::exit(1),
    }
}
