//! Dump the Casebook REST API document: to stdout, or to the path given
//! as the first argument.

use server::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> std::io::Result<()> {
    let doc = ApiDoc::openapi()
        .to_pretty_json()
        .expect("Failed to serialize OpenAPI document to JSON");

    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, doc)?;
            eprintln!("Wrote {path}");
        }
        None => println!("{doc}"),
    }
    Ok(())
}
