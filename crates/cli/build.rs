use std::{env, fs, path::PathBuf};

use clap::{Arg, ArgAction, Command};

fn input_args(cmd: Command) -> Command {
    cmd.arg(clap::arg!(<INPUT> ... "Bookmark files, or '-' for stdin"))
        .arg(
            clap::arg!(-i --input_format <FORMAT> "Input format")
                .value_parser(["netscape", "firefox", "text", "lines"]),
        )
        .arg(clap::arg!(--tag_separator <SEP> "Separator of tag lists in HTML and JSON input").default_value(","))
        .arg(
            Arg::new("drop-param")
                .long("drop-param")
                .value_name("NAME")
                .action(ArgAction::Append)
                .help("Query parameter to remove from URLs before deduplication"),
        )
        .arg(clap::arg!(--keep_trailing_slash "Keep trailing slashes when comparing URLs"))
        .arg(
            clap::arg!(--substitutions <DIR> "Directory of extra tag substitution files")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--no_standard_substitutions "Skip the standard substitution directory"))
        .arg(clap::arg!(--untagged_label <LABEL> "Name used for bookmarks without tags").default_value("untagged"))
}

fn output_args(cmd: Command) -> Command {
    cmd.arg(
        clap::arg!(-o --output <FILE> "Output file (default: stdout)")
            .value_parser(clap::value_parser!(std::path::PathBuf)),
    )
    .arg(clap::arg!(-f --format <FORMAT> "Output format").value_parser(["netscape", "org", "text", "json", "lines"]))
    .arg(clap::arg!(--collapse "Collapse single-child tag chains in JSON output"))
    .arg(clap::arg!(--pretty "Pretty-print JSON output"))
    .arg(clap::arg!(--title <TITLE> "Title of HTML output").default_value("Bookmarks"))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let plain_output = clap::arg!(-o --output <FILE> "Output file (default: stdout)")
        .value_parser(clap::value_parser!(std::path::PathBuf));

    let mut cmd = Command::new("bkmkorg")
        .version(env!("CARGO_PKG_VERSION"))
        .author("bkmkorg contributors")
        .about("Organize bookmarks by tag")
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand(output_args(input_args(Command::new("export").about("Merge bookmark files and export them"))))
        .subcommand(
            output_args(input_args(Command::new("query").about("Export only bookmarks carrying every given tag")))
                .arg(clap::arg!(-t --tag <TAG> "Tag to match").action(ArgAction::Append).required(true)),
        )
        .subcommand(input_args(Command::new("tags").about("Write a tag count file")).arg(plain_output.clone()))
        .subcommand(
            input_args(Command::new("params").about("Report query parameters used across bookmark URLs"))
                .arg(plain_output),
        )
        .subcommand(output_args(input_args(
            Command::new("diff")
                .about("List bookmarks of OTHER whose URL is missing from BASE")
                .arg(clap::arg!(<BASE> "Reference bookmark file")),
        )));

    for shell in [
        clap_complete::Shell::Bash,
        clap_complete::Shell::Zsh,
        clap_complete::Shell::Fish,
        clap_complete::Shell::PowerShell,
    ] {
        clap_complete::generate_to(shell, &mut cmd, "bkmkorg", &completions_dir).unwrap();
    }

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}
