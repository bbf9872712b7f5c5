//! Build script for man page generation.
//!
//! Generates a man page for the `symbolon` binary using `clap_mangen`. The CLI
//! definitions are imported from the `cli-defs` crate, which provides stable
//! types shared between build-time and runtime consumers.

use std::{env, fs, io, path::PathBuf};

use clap::CommandFactory;
use clap_mangen::Man;
use cli_defs::Cli;

fn main() -> io::Result<()> {
    println!("cargo::rerun-if-changed=cli-defs");

    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            // Cargo does not set OUT_DIR for `cargo check` or IDE analysis runs.
            return Ok(());
        }
    };

    let cmd = Cli::command();
    let man = Man::new(cmd.clone());
    let man_path = out_dir.join("symbolon.1");
    let mut file = fs::File::create(&man_path)?;
    man.render(&mut file)?;

    // Each subcommand gets its own page so `man symbolon-batch` works too.
    for sub in cmd.get_subcommands() {
        let name = format!("symbolon-{}", sub.get_name());
        let page = Man::new(sub.clone()).title(name.as_str());
        let mut sub_file = fs::File::create(out_dir.join(format!("{name}.1")))?;
        page.render(&mut sub_file)?;
    }

    Ok(())
}
