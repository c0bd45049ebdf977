use std::path::PathBuf;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::Itertools;

use crate::{
  schema::SchemaDef,
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::GraphLoader,
};

fn describe_discriminator(schema: &SchemaDef) -> String {
  match (&schema.discriminator_property, &schema.discriminator_value) {
    (Some(property), None) => format!("root ({property})"),
    (None, Some(value)) => format!("variant \"{value}\""),
    (Some(property), Some(value)) => format!("root ({property}), variant \"{value}\""),
    (None, None) => String::new(),
  }
}

pub async fn list_models(input: &PathBuf, colors: &Colors) -> anyhow::Result<()> {
  let graph = GraphLoader::open(input).await?.parse()?;

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  header.add_cell(Cell::new("MODEL").fg(IntoComfyColor::into(colors.label())));
  header.add_cell(Cell::new("PARENTS").fg(IntoComfyColor::into(colors.label())));
  header.add_cell(Cell::new("PROPERTIES").fg(IntoComfyColor::into(colors.label())));
  header.add_cell(Cell::new("DISCRIMINATOR").fg(IntoComfyColor::into(colors.label())));
  table.set_header(header);

  for (name, schema) in graph.iter() {
    let parents = schema.parents.iter().join(", ");

    let mut row = Row::new();
    row.add_cell(
      Cell::new(name)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(parents).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(
      Cell::new(schema.properties.len())
        .fg(IntoComfyColor::into(colors.info()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(describe_discriminator(schema)).fg(IntoComfyColor::into(colors.accent())));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
