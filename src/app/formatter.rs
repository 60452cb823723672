use crate::app::models::{Column, TableModel};
use crate::app::naming::{sanitize_identifier, to_parameter_name, to_pascal_case};
use crate::app::types::{is_text_type, map_type};
use std::fmt::Write;

/// Prefix for generated class names and their file names.
pub const CLASS_PREFIX: &str = "Cls";
/// Prefix for private backing fields.
pub const FIELD_PREFIX: &str = "var";
pub const FILE_EXTENSION: &str = "cs";

pub struct OutputGenerator;

impl OutputGenerator {
    /// Pascal-cased table name, without the class prefix.
    pub fn class_name(table: &str) -> String {
        to_pascal_case(table)
    }

    pub fn file_name(class_name: &str) -> String {
        format!("{CLASS_PREFIX}{class_name}.{FILE_EXTENSION}")
    }

    /// Renders the entity class. Annotations are emitted commented out.
    pub fn generate_class(
        model: &TableModel,
        class_name: &str,
    ) -> Result<String, std::fmt::Error> {
        let class_ident = sanitize_identifier(&format!("{CLASS_PREFIX}{class_name}"));
        let mut output = String::new();

        writeln!(output, "// Auto-generated file.")?;
        writeln!(output, "// Source: [{}].[{}]", model.schema, model.table)?;
        writeln!(output, "using System;")?;
        writeln!(output, "using System.ComponentModel.DataAnnotations;")?;
        writeln!(output, "using System.ComponentModel.DataAnnotations.Schema;")?;
        writeln!(output)?;
        writeln!(
            output,
            "//[Table(\"{}\", Schema = \"{}\")]",
            model.table, model.schema
        )?;
        writeln!(output, "public class {class_ident}")?;
        writeln!(output, "{{")?;

        for col in &model.columns {
            writeln!(
                output,
                "    private {} {};",
                map_type(&col.source_type, col.is_nullable),
                field_name(col)
            )?;
        }
        writeln!(output)?;

        writeln!(output, "    public {class_ident}() {{ }}")?;
        writeln!(output)?;

        let ctor_columns: Vec<&Column> = model
            .columns
            .iter()
            .filter(|c| !model.is_identity(&c.name))
            .collect();
        if !ctor_columns.is_empty() {
            let params: Vec<String> = ctor_columns
                .iter()
                .map(|c| {
                    format!(
                        "{} {}",
                        map_type(&c.source_type, c.is_nullable),
                        to_parameter_name(&c.name)
                    )
                })
                .collect();
            writeln!(output, "    public {class_ident}({})", params.join(", "))?;
            writeln!(output, "    {{")?;
            for col in &ctor_columns {
                writeln!(
                    output,
                    "        this.{} = {};",
                    field_name(col),
                    to_parameter_name(&col.name)
                )?;
            }
            writeln!(output, "    }}")?;
            writeln!(output)?;
        }

        for col in &model.columns {
            Self::write_property(&mut output, model, col)?;
        }

        writeln!(output, "}}")?;
        Ok(output)
    }

    fn write_property(
        output: &mut String,
        model: &TableModel,
        col: &Column,
    ) -> Result<(), std::fmt::Error> {
        writeln!(output, "    //[Column(\"{}\")]", col.name)?;

        if let Some(len) = col.max_length.filter(|len| *len > 0)
            && is_text_type(&col.source_type)
        {
            writeln!(output, "    //[MaxLength({len})]")?;
        }
        if model.is_primary_key(&col.name) {
            writeln!(output, "    //[Key]")?;
        }
        if model.is_identity(&col.name) {
            writeln!(
                output,
                "    //[DatabaseGenerated(DatabaseGeneratedOption.Identity)]"
            )?;
        }
        if let Some(fk) = model.foreign_key(&col.name) {
            writeln!(
                output,
                "    // FK -> [{}].[{}].[{}]",
                fk.schema, fk.table, fk.column
            )?;
        }

        let field = field_name(col);
        writeln!(
            output,
            "    public {} {}",
            map_type(&col.source_type, col.is_nullable),
            to_pascal_case(&col.name)
        )?;
        writeln!(output, "    {{")?;
        writeln!(output, "        get => {field};")?;
        writeln!(output, "        set => {field} = value;")?;
        writeln!(output, "    }}")?;
        writeln!(output)?;
        Ok(())
    }
}

fn field_name(col: &Column) -> String {
    format!("{FIELD_PREFIX}{}", sanitize_identifier(&col.name))
}
