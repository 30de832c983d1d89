//! strlen, strcpy, strcat, strcmp and strncmp over fixed literals.

use nos_smoke_core::string::{as_text, strcat, strcmp, strcpy, strlen, strncmp};

use crate::error::DemoError;
use crate::session::Session;

const HELLO: &[u8] = b"Hello";
const NOS: &[u8] = b"NOS";
const SUFFIX: &[u8] = b" NOS";
const HELP: &[u8] = b"Help";

pub fn run(s: &mut Session<'_>) -> Result<(), DemoError> {
    let hello_len = strlen(HELLO);
    let nos_len = strlen(NOS);
    s.line(format_args!("  strlen(\"Hello\") = {hello_len}"))?;
    s.line(format_args!("  strlen(\"NOS\") = {nos_len}"))?;
    s.check("strlen", hello_len == 5 && nos_len == 3, None)?;

    let mut buf = [0u8; 32];
    strcpy(&mut buf, HELLO);
    s.line(format_args!("  strcpy(buf, \"Hello\") → \"{}\"", as_text(&buf)))?;
    s.check("strcpy", as_text(&buf) == "Hello", None)?;

    strcat(&mut buf, SUFFIX);
    let joined = as_text(&buf).into_owned();
    s.line(format_args!("  strcat(buf, \" NOS\") → \"{joined}\""))?;
    s.check(
        "strcat",
        joined == "Hello NOS",
        (joined != "Hello NOS").then(|| format!("got \"{joined}\"")),
    )?;

    let same = strcmp(HELLO, HELLO);
    let differ = strcmp(HELLO, NOS);
    s.line(format_args!("  strcmp(\"Hello\", \"Hello\") = {same}"))?;
    s.line(format_args!("  strcmp(\"Hello\", \"NOS\") = {differ}"))?;
    s.check("strcmp", same == 0 && differ < 0, None)?;

    let prefix = strncmp(HELLO, HELP, 3);
    s.line(format_args!("  strncmp(\"Hello\", \"Help\", 3) = {prefix}"))?;
    s.check("strncmp 前缀比较", prefix == 0, None)?;
    Ok(())
}
