use std::io::{self, BufRead, ErrorKind, Write};

/// Prompt on stdout and read one trimmed line from stdin.
pub fn read_input(name: &str) -> io::Result<String> {
    print!("Please enter {name}: ");
    io::stdout().flush()?;
    read_line(io::stdin().lock())
}

/// Same as [`read_input`] without echoing, for passwords.
pub fn read_input_hidden(name: &str) -> io::Result<String> {
    rpassword::prompt_password(format!("Please enter {name}: "))
}

fn read_line(mut reader: impl BufRead) -> io::Result<String> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
