//! Where raw documents come from.

use std::fmt;
use std::path::PathBuf;

use tokio::io::AsyncReadExt;

use crate::FeedError;

/// One input document: a file on disk or standard input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    File(PathBuf),
    Stdin,
}

impl Source {
    /// `-` reads stdin; anything else is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    /// Read the whole document. Invalid UTF-8 is replaced rather than
    /// rejected; pasted pages are rarely clean.
    pub async fn read(&self) -> Result<String, FeedError> {
        let bytes = match self {
            Source::File(path) => tokio::fs::read(path).await.map_err(|source| FeedError::Read {
                source_name: self.to_string(),
                source,
            })?,
            Source::Stdin => {
                let mut buf = Vec::new();
                tokio::io::stdin()
                    .read_to_end(&mut buf)
                    .await
                    .map_err(|source| FeedError::Read { source_name: self.to_string(), source })?;
                buf
            }
        };
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Stdin => f.write_str("<stdin>"),
        }
    }
}
