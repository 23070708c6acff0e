//! RSO Packager - assembles point-of-sale terminal deployment packages.
//!
//! Reads a JSON input file, moves staged forms and firmware into a package
//! tree, generates readme files, changelog and batch scripts, and writes a
//! content manifest.

use rso_packager::cli;
use std::process;

fn main() {
    env_logger::init();
    process::exit(cli::run());
}
