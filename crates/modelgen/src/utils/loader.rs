use std::path::Path;

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

use crate::schema::SchemaGraph;

/// Memory-mapped schema graph input.
pub struct GraphLoader {
  file: AsyncMmapFile,
}

impl GraphLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path).await?;
    Ok(Self { file })
  }

  pub fn parse(&self) -> anyhow::Result<SchemaGraph> {
    Ok(serde_json::from_slice::<SchemaGraph>(self.file.as_slice())?)
  }
}
