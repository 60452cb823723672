// Database type name -> C# type name.

/// Target type for anything the table below does not know.
pub const DEFAULT_TYPE: &str = "string";

/// Maps a catalog type name to a C# type, adding `?` to nullable value types.
///
/// `string` and `byte[]` are reference types and never get the suffix.
pub fn map_type(source_type: &str, is_nullable: bool) -> String {
    let core = base_type(source_type);
    if is_reference_type(core) || !is_nullable {
        core.to_string()
    } else {
        format!("{core}?")
    }
}

fn base_type(source_type: &str) -> &'static str {
    match source_type.trim().to_lowercase().as_str() {
        "tinyint" => "byte",
        "smallint" | "int2" | "smallserial" => "short",
        "int" | "integer" | "int4" | "serial" => "int",
        "bigint" | "int8" | "bigserial" => "long",
        "bit" | "bool" | "boolean" => "bool",
        "decimal" | "numeric" | "money" | "smallmoney" => "decimal",
        "float" | "float8" | "double precision" => "double",
        "real" | "float4" => "float",
        "date" | "datetime" | "datetime2" | "smalldatetime" | "timestamp"
        | "timestamp without time zone" => "DateTime",
        "time" | "time without time zone" | "interval" => "TimeSpan",
        "datetimeoffset" | "timestamptz" | "timestamp with time zone" => "DateTimeOffset",
        "char" | "nchar" | "varchar" | "nvarchar" | "text" | "ntext" | "bpchar" | "character"
        | "character varying" | "citext" | "name" => "string",
        "uniqueidentifier" | "uuid" => "Guid",
        "binary" | "varbinary" | "image" | "bytea" => "byte[]",
        "xml" | "json" | "jsonb" => "string",
        _ => DEFAULT_TYPE,
    }
}

fn is_reference_type(target: &str) -> bool {
    target == "string" || target.ends_with("[]")
}

/// Character types whose maximum length is worth a `MaxLength` hint.
pub fn is_text_type(source_type: &str) -> bool {
    matches!(
        source_type.trim().to_lowercase().as_str(),
        "char"
            | "nchar"
            | "varchar"
            | "nvarchar"
            | "text"
            | "ntext"
            | "bpchar"
            | "character"
            | "character varying"
    )
}
