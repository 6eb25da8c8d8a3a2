//! Print an argon2 hash for seeding a caseworker account:
//! `cargo run -p server --features server --bin hash-password -- <password>`

fn main() {
    let password = std::env::args()
        .nth(1)
        .expect("usage: hash-password <password>");
    let hash = server::auth::password::hash_password(&password).expect("Failed to hash password");
    println!("{hash}");
}
