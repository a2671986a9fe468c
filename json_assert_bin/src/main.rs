use json_assert::eval::Resolution;
use json_assert::matchers::JsonPathMatchers;
use json_assert::JsonPathQuery;
use serde_json::Value;

use clap::{Parser, ValueEnum};
use std::error::Error;
use std::io::{self, Read};
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The jsonpath string.
    #[arg(short, long)]
    jsonpath: String,

    /// Assert that the resolved value equals this JSON literal.
    #[arg(long, conflicts_with_all = ["exists", "not_exists", "kind"])]
    equals: Option<String>,

    /// Assert that a value exists at the path.
    #[arg(long, conflicts_with_all = ["not_exists", "kind"])]
    exists: bool,

    /// Assert that no value exists at the path.
    #[arg(long, conflicts_with = "kind")]
    not_exists: bool,

    /// Assert that the resolved value is of this kind.
    #[arg(long, value_enum)]
    kind: Option<Kind>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind {
    Array,
    Boolean,
    Number,
    Map,
    String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut json = String::new();
    io::stdin().read_to_string(&mut json)?;

    if let Some(expected) = &args.equals {
        let expected = Value::from_str(expected)?;
        JsonPathMatchers::new(&args.jsonpath)?.value(&json, expected)?;
    } else if args.exists {
        JsonPathMatchers::new(&args.jsonpath)?.exists(&json)?;
    } else if args.not_exists {
        JsonPathMatchers::new(&args.jsonpath)?.does_not_exist(&json)?;
    } else if let Some(kind) = args.kind {
        let matchers = JsonPathMatchers::new(&args.jsonpath)?;
        match kind {
            Kind::Array => matchers.is_array(&json)?,
            Kind::Boolean => matchers.is_boolean(&json)?,
            Kind::Number => matchers.is_number(&json)?,
            Kind::Map => matchers.is_map(&json)?,
            Kind::String => matchers.is_string(&json)?,
        }
    } else {
        let value = Value::from_str(json.as_str())?;
        match value.query(&args.jsonpath)? {
            Resolution::Found(result) => println!("{}", result),
            Resolution::Missing => println!("no value at {}", args.jsonpath),
        }
    }
    Ok(())
}
