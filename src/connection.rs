use rusqlite::Connection;

use crate::error::Result;

pub fn conn(database_url: &str) -> Result<Connection> {
    let conn = Connection::open(database_url)?;

    // Initialize the database tables
    crate::database::create_database_with_connection(&conn)?;

    Ok(conn)
}

pub fn in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    crate::database::create_database_with_connection(&conn)?;
    Ok(conn)
}
