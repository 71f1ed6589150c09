use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::io::{BufRead, Read};

use prelude::{lang, lang::*};

use eyre::eyre;
use eyre::Result;

/// Suffix of the files this tool writes, so they are not offered as setups.
pub const OUTPUT_SUFFIX: &str = ".stacks.json";

macro_rules! print_flush {
    ($($arg:tt)*) => {{
        use std::io::Write;
        print!($($arg)*);
        std::io::stdout().flush()?;
    }};
}

pub fn get_lang() -> Result<()> {
    let mut s = String::new();
    print_flush!("Válassz nyelvet (enter = magyar) / Select language (enter = hungarian): ");

    io::stdin().read_line(&mut s)?;

    while match_set_language(&s).is_err() {
        // If it's just empty, stick with default
        if s.trim().is_empty() {
            println!(
                "{}: {}",
                lang!["Alapértelmezett nyelv használata", "Using default language"],
                get_language()
            );
            return Ok(());
        }

        print_flush!("Invalid opció, próbálkozz újra / Invalid option, try again: ");
        s.clear();
        io::stdin().read_line(&mut s)?;
    }

    println!(
        "{}: {}",
        lang!["Kiválasztott nyelv", "Chosen language"],
        get_language()
    );

    Ok(())
}

fn is_setup_file(name: &str) -> bool {
    let name = name.to_lowercase();
    name.ends_with(".json") && !name.ends_with(OUTPUT_SUFFIX)
}

pub fn get_path() -> Result<String> {
    println!(
        "{}",
        lang![
            "Az ebben a mappában található .json file-ok közül válaszd ki a felállást:",
            "Select the setup from the .json files found in this folder: "
        ]
    );

    let mut paths = BTreeMap::new();
    for entry in fs::read_dir(".")? {
        let path = entry?.path();
        let is_setup = path
            .file_name()
            .map(|name| is_setup_file(&name.to_string_lossy()))
            .unwrap_or(false);
        if path.is_file() && is_setup {
            paths.insert(paths.len(), path.to_string_lossy().into_owned());
        }
    }

    match paths.len() {
        // If only one .json, it must be that
        1 => {
            let path = paths
                .into_values()
                .next()
                .ok_or(eyre!("Setup file disappeared"))?;
            println!(
                "{}: {}",
                lang!["Csak egy .json file található", "Only one .json file found"],
                path
            );
            print_flush!(
                "{}: ",
                lang!["Nyomj Entert ha ez jó", "Press Enter to confirm"]
            );
            let mut c = [0; 1];
            io::stdin().read_exact(&mut c)?;
            match c[0] as char {
                '\n' => Ok(path),
                _ => {
                    Err(io::Error::new(io::ErrorKind::NotFound, "Single file not selected").into())
                }
            }
        }
        0 => {
            println!(
                "{}",
                lang![
                    "Nincs .json file ebben a mappában. Futtasd ezt a programot ott, ahol a felállás van.",
                    "No .json files in this directory. Run this program where the setup file is."
                ]
            );
            Err(io::Error::new(io::ErrorKind::NotFound, "No .json file found.").into())
        }
        _ => {
            for (i, path) in &paths {
                println!("{i}: {path}");
            }

            print_flush!(
                "{}",
                lang!["A felállás file száma: ", "The setup file's number: "]
            );

            choose_path(&mut io::stdin().lock(), &paths)
        }
    }
}

/// Reads file numbers until one of `paths` is picked. Running out of input is an error.
fn choose_path(input: &mut impl BufRead, paths: &BTreeMap<usize, String>) -> Result<String> {
    loop {
        let mut s = String::new();
        if input.read_line(&mut s)? == 0 {
            return Err(eyre!("No setup file selected"));
        }

        if let Some(path) = s.trim().parse::<usize>().ok().and_then(|i| paths.get(&i)) {
            return Ok(path.clone());
        }

        print_flush!(
            "{}",
            lang![
                "Ilyen számú file nem található, próbáld újra: ",
                "No such file number found, try again: "
            ]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_files_are_not_setups() {
        assert!(is_setup_file("opening.json"));
        assert!(is_setup_file("Opening.JSON"));
        assert!(!is_setup_file("opening.json.stacks.json"));
        assert!(!is_setup_file("opening.svg"));
    }

    fn two_setups() -> BTreeMap<usize, String> {
        BTreeMap::from([(0, "a.json".to_owned()), (1, "b.json".to_owned())])
    }

    #[test]
    fn picks_numbered_file_after_bad_input() {
        let mut input = "seven\n5\n1\n".as_bytes();
        assert_eq!(choose_path(&mut input, &two_setups()).unwrap(), "b.json");
    }

    #[test]
    fn running_out_of_input_stops_asking() {
        let mut input = "".as_bytes();
        assert!(choose_path(&mut input, &two_setups()).is_err());

        let mut input = "9\n".as_bytes();
        assert!(choose_path(&mut input, &two_setups()).is_err());
    }
}
