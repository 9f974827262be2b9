use anyhow::Result;
use std::io::{self, BufRead, Write};


#[derive(Debug, Eq, PartialEq)]
pub enum MenuChoice {
    Option(usize),
    Back,
    Exit,
}

/// Reads one trimmed line. `None` means the input stream has closed.
pub fn prompt(text: &str) -> Result<Option<String>> {
    prompt_from(&mut io::stdin().lock(), text)
}

fn prompt_from<R: BufRead>(input: &mut R, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// Underscores in topic file names read better as spaces.
pub fn display_name(topic: &str) -> String {
    topic.replace('_', " ")
}

/// Shows a numbered menu and returns the selection. Loops until the input is
/// valid; a closed input stream counts as choosing Exit.
pub fn choose(title: &str, options: &[&str], allow_back: bool) -> Result<MenuChoice> {
    choose_from(&mut io::stdin().lock(), title, options, allow_back)
}

fn choose_from<R: BufRead>(
    input: &mut R,
    title: &str,
    options: &[&str],
    allow_back: bool,
) -> Result<MenuChoice> {
    loop {
        println!("\n{}", title);
        for (i, option) in options.iter().enumerate() {
            println!("{}. {}", i + 1, display_name(option));
        }
        let back_entry = options.len() + 1;
        let exit_entry = if allow_back {
            println!("{}. Go back", back_entry);
            back_entry + 1
        } else {
            back_entry
        };
        println!("{}. Exit", exit_entry);

        let line = match prompt_from(input, "Enter number: ")? {
            Some(line) => line,
            None => return Ok(MenuChoice::Exit),
        };
        if let Ok(choice) = line.parse::<usize>() {
            if choice >= 1 && choice <= options.len() {
                return Ok(MenuChoice::Option(choice - 1));
            }
            if allow_back && choice == back_entry {
                return Ok(MenuChoice::Back);
            }
            if choice == exit_entry {
                return Ok(MenuChoice::Exit);
            }
        }
        println!("Invalid input. Please try again.");
    }
}
