// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use svgclass::{Color, Command, Document, Error, Indent, WriteOptions};

const HELP: &str = "\
svgclass converts hardcoded SVG colors into CSS class references.

USAGE:
  svgclass <COMMAND [ARGS]>... FILE...

COMMANDS:
  -h, --help            Prints help information
  -v, --version         Prints version information
  -b, --backup POSTFIX  Creates a backup of every processed file,
                        with POSTFIX appended to its name
  -a, --add-class STYLE_ID NAME COLOR
                        Adds the class NAME with the given COLOR to the
                        stylesheet with id STYLE_ID, or updates it
  -c, --color-to-class COLOR CLASS
                        Finds elements painted with COLOR, removes the
                        color and applies the class CLASS instead
  -r, --reapply         Removes color attributes from all elements
                        (try this after editing your file with Inkscape)

Commands accumulate, in the order given, and are applied to every file.

OPTIONS:
  --indent INDENT       Sets the XML nodes indent
                        [values: none, 0, 1, 2, 3, 4, tabs] [default: 2]
  --quiet               Disables warnings

ARGS:
  FILE...               Input files, processed in place
";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}.", e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<(), Error> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut commands = Vec::new();
    let mut backup: Option<String> = None;
    let mut indent = Indent::Spaces(2);
    let mut quiet = false;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--" => {
                i += 1;
                break;
            }
            "-h" | "--help" => {
                print!("{}", HELP);
                return Ok(());
            }
            "-v" | "--version" => {
                println!("{}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "-b" | "--backup" => {
                check_command(arg, 1, i, args.len())?;
                backup = Some(args[i + 1].clone());
                i += 2;
            }
            "--indent" => {
                check_command(arg, 1, i, args.len())?;
                indent = parse_indent(&args[i + 1])?;
                i += 2;
            }
            "--quiet" => {
                quiet = true;
                i += 1;
            }
            "-a" | "--add-class" => {
                check_command(arg, 3, i, args.len())?;
                commands.push(Command::AddClass {
                    style_id: args[i + 1].clone(),
                    class_name: args[i + 2].clone(),
                    color: parse_color(&args[i + 3])?,
                });
                i += 4;
            }
            "-c" | "--color-to-class" => {
                check_command(arg, 2, i, args.len())?;
                commands.push(Command::ColorToClass {
                    color: parse_color(&args[i + 1])?,
                    class_name: args[i + 2].clone(),
                });
                i += 3;
            }
            "-r" | "--reapply" => {
                commands.push(Command::Reapply);
                i += 1;
            }
            _ => break,
        }
    }

    let files = &args[i..];
    if files.is_empty() {
        if !commands.is_empty() {
            return Err(Error::NoInputFiles);
        }
        print!("{}", HELP);
        return Ok(());
    }
    if commands.is_empty() {
        return Err(Error::NoCommands);
    }

    if !quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    let opt = WriteOptions { indent };
    for file in files {
        process_file(Path::new(file), &commands, backup.as_deref(), &opt)?;
    }

    Ok(())
}

fn check_command(cmd: &str, needed: usize, pos: usize, available: usize) -> Result<(), Error> {
    if pos + needed < available {
        Ok(())
    } else {
        Err(Error::InvalidArguments(format!(
            "the '{}' command requires {} argument{}",
            cmd,
            needed,
            if needed == 1 { "" } else { "s" }
        )))
    }
}

fn parse_color(s: &str) -> Result<Color, Error> {
    Color::parse(s).ok_or_else(|| Error::InvalidArguments(format!("invalid color value: '{}'", s)))
}

fn parse_indent(s: &str) -> Result<Indent, Error> {
    let indent = match s {
        "none" => Indent::None,
        "0" => Indent::Spaces(0),
        "1" => Indent::Spaces(1),
        "2" => Indent::Spaces(2),
        "3" => Indent::Spaces(3),
        "4" => Indent::Spaces(4),
        "tabs" => Indent::Tabs,
        _ => {
            return Err(Error::InvalidArguments(format!(
                "invalid INDENT value: '{}'",
                s
            )))
        }
    };

    Ok(indent)
}

fn process_file(
    path: &Path,
    commands: &[Command],
    backup: Option<&str>,
    opt: &WriteOptions,
) -> Result<(), Error> {
    let text =
        std::fs::read_to_string(path).map_err(|_| Error::OpenFailed(path.to_path_buf()))?;
    let mut doc = Document::parse_str(&text)
        .map_err(|e| Error::ParsingFailed(path.to_path_buf(), e))?;

    for command in commands {
        command.apply(&mut doc)?;
    }

    // The file is written back only after every command succeeded.
    if let Some(postfix) = backup {
        let mut backup_path = path.to_path_buf().into_os_string();
        backup_path.push(postfix);
        let backup_path = PathBuf::from(backup_path);
        // An existing backup is overwritten.
        std::fs::copy(path, &backup_path).map_err(|_| Error::BackupFailed(backup_path.clone()))?;
    }

    let data = doc.to_string(opt);
    let mut file = File::create(path).map_err(|_| Error::WriteOpenFailed(path.to_path_buf()))?;
    file.write_all(data.as_bytes())
        .map_err(|_| Error::WritingFailed(path.to_path_buf()))?;

    Ok(())
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}): {}", target, record.args()),
                log::Level::Warn => eprintln!("Warning (in {}): {}", target, record.args()),
                _ => eprintln!("{} (in {}): {}", record.level(), target, record.args()),
            }
        }
    }

    fn flush(&self) {}
}
