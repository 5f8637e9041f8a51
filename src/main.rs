#[macro_use]
extern crate clap;
extern crate chrono;

use chrono::Local;
use clap::App;
use envcrack::{Bounds, Search, CIPHERTEXT};
use std::env;
use std::time::Instant;

fn now() -> String {
    Local::now().format("%T").to_string()
}

/// Map the legacy `-exit` spelling (and any single-dash prefix of it, which
/// the historical interface also accepted) onto the `--exit` flag.
fn normalize_exit_flag(arg: String) -> String {
    if arg.len() > 1 && !arg.starts_with("--") && "-exit".starts_with(&arg) {
        "--exit".to_string()
    } else {
        arg
    }
}

fn main() {
    let yaml = load_yaml!("../cli.yml");
    let matches = App::from_yaml(yaml).get_matches_from(env::args().map(normalize_exit_flag));

    let bounds = Bounds::default();

    if matches.is_present("estimate") {
        estimate(&bounds);
        return;
    }

    let search = Search::new(&CIPHERTEXT, bounds, matches.is_present("exit")).unwrap();

    println!(
        "[{}] Searching {} candidate keys on {} workers",
        now(),
        search.bounds().size(),
        search.bounds().months().count()
    );

    let found = search.run();

    println!("[{}] Search complete, {} match(es) found", now(), found);
}

/// Time one day's slice of the space and extrapolate a full run
fn estimate(bounds: &Bounds) {
    println!("There are {} keys to search", bounds.size());

    let mut sample = bounds.clone();
    sample.day = (sample.day.0, sample.day.0);
    let scale = bounds.size() as f64 / sample.size() as f64;

    let search = Search::new(&CIPHERTEXT, sample, false).unwrap();

    let start = Instant::now();
    search.run();
    let elapsed = start.elapsed().as_secs_f64();

    println!("Test run took {:.3} seconds", elapsed);
    println!("A full search would take around {:.0} seconds", elapsed * scale);
}

#[cfg(test)]
mod tests {
    use super::normalize_exit_flag;

    fn normalize(arg: &str) -> String {
        normalize_exit_flag(arg.to_string())
    }

    #[test]
    fn legacy_exit_spellings() {
        assert_eq!("--exit", normalize("-exit"));
        assert_eq!("--exit", normalize("-e"));
        assert_eq!("--exit", normalize("-exi"));
    }

    #[test]
    fn other_arguments_pass_through() {
        assert_eq!("--exit", normalize("--exit"));
        assert_eq!("--estimate", normalize("--estimate"));
        assert_eq!("envcrack", normalize("envcrack"));
        assert_eq!("-s", normalize("-s"));
        assert_eq!("-", normalize("-"));
        assert_eq!("-exits", normalize("-exits"));
    }
}
