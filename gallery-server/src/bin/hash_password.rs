//! Prints the argon2 hash to put in `ADMIN_PASSWORD_HASH`.

use gallery_server::infrastructure::security::hash_password;

fn main() -> anyhow::Result<()> {
    let password = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: gallery-hash-password <password>"))?;
    let hash = hash_password(&password).map_err(|e| anyhow::anyhow!("hashing failed: {}", e))?;
    println!("{}", hash);
    Ok(())
}
