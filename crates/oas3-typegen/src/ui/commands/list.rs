use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::operations::{OperationEntry, collect_operations},
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::spec::load_documents,
};

pub async fn list_operations(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let documents = load_documents(input).await?;
  let mut operations = collect_operations(&documents)?;
  operations.sort_by(|a, b| a.operation_id.cmp(&b.operation_id));

  println!("{}", operations_table(&operations, colors, term_width()));
  Ok(())
}

fn operations_table(operations: &[OperationEntry], colors: &Colors, width: u16) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(width);

  let mut row = Row::new();
  row.add_cell(Cell::new("OPERATION ID").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("METHOD").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("PATH").fg(IntoComfyColor::into(colors.label())));
  table.set_header(row);

  for operation in operations {
    let mut id = Cell::new(&operation.operation_id).fg(IntoComfyColor::into(colors.value()));
    id = if operation.deprecated {
      id.add_attribute(Attribute::CrossedOut)
    } else {
      id.add_attribute(Attribute::Bold)
    };

    let mut row = Row::new();
    row.add_cell(id);
    row.add_cell(
      Cell::new(operation.method.as_str())
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(&operation.path).fg(IntoComfyColor::into(colors.primary())));
    table.add_row(row);
  }

  table
}
