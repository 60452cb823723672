//! End-to-end tests for class rendering and file output.
//!
//! The catalog queries need a live database, so these tests build the
//! `TableModel` by hand and drive the renderer and writer from there. The
//! connection failure path is covered against a closed local port.

use table_class_gen::{
    AppConfig, Column, ForeignKeyInfo, GenError, NameSet, OutputGenerator, TableModel,
    TableTarget, generate_class, load_model, write_class,
};
use tempfile::TempDir;

fn orders_model() -> TableModel {
    let keys: NameSet = ["Id"].into_iter().collect();
    let identity: NameSet = ["Id"].into_iter().collect();
    TableModel::new(
        "dbo",
        "Orders",
        vec![
            Column::new("Id", "int", false, 1),
            Column::new("CustomerId", "int", false, 2),
            Column::new("Notes", "varchar", true, 3).with_max_length(500),
        ],
    )
    .with_primary_keys(keys)
    .with_identity_columns(identity)
    .with_foreign_keys([ForeignKeyInfo {
        column_name: "CustomerId".to_string(),
        ref_schema: "dbo".to_string(),
        ref_table: "Customers".to_string(),
        ref_column: "Id".to_string(),
    }])
}

/// Lines between the `//[Column("name")]` marker and the end of that accessor.
fn property_block<'a>(code: &'a str, column: &str) -> &'a str {
    let marker = format!("    //[Column(\"{column}\")]");
    let start = code
        .find(&marker)
        .unwrap_or_else(|| panic!("no property block for {column}"));
    let end = code[start..]
        .find("    }\n")
        .map(|i| start + i)
        .expect("unterminated property");
    &code[start..end]
}

#[test]
fn test_orders_scenario_fields_and_accessors() {
    let code = OutputGenerator::generate_class(&orders_model(), "Orders").unwrap();

    assert!(code.contains("    private int varId;\n"));
    assert!(code.contains("    private int varCustomerId;\n"));
    assert!(code.contains("    private string varNotes;\n"));

    assert!(code.contains("    public int Id\n"));
    assert!(code.contains("    public int CustomerId\n"));
    assert!(code.contains("    public string Notes\n"));
}

#[test]
fn test_orders_scenario_constructor_skips_identity() {
    let code = OutputGenerator::generate_class(&orders_model(), "Orders").unwrap();

    assert!(code.contains("    public ClsOrders() { }\n"));
    assert!(code.contains(
        "    public ClsOrders(int customerId, string notes)\n    {\n        this.varCustomerId = customerId;\n        this.varNotes = notes;\n    }\n"
    ));
    assert!(!code.contains("this.varId"));
}

#[test]
fn test_orders_scenario_annotations_attach_to_right_columns() {
    let code = OutputGenerator::generate_class(&orders_model(), "Orders").unwrap();

    let id = property_block(&code, "Id");
    let customer = property_block(&code, "CustomerId");
    let notes = property_block(&code, "Notes");

    assert!(id.contains("//[Key]"));
    assert!(id.contains("//[DatabaseGenerated(DatabaseGeneratedOption.Identity)]"));
    assert!(!id.contains("MaxLength"));
    assert!(!id.contains("FK ->"));

    assert!(customer.contains("    // FK -> [dbo].[Customers].[Id]\n"));
    assert!(!customer.contains("MaxLength"));
    assert!(!customer.contains("//[Key]"));

    assert!(notes.contains("    //[MaxLength(500)]\n"));
    assert!(!notes.contains("FK ->"));

    assert_eq!(code.matches("//[MaxLength(").count(), 1);
    assert_eq!(code.matches("// FK ->").count(), 1);
}

#[test]
fn test_key_comment_directly_precedes_accessor() {
    let code = OutputGenerator::generate_class(&orders_model(), "Orders").unwrap();
    assert!(code.contains(
        "    //[Key]\n    //[DatabaseGenerated(DatabaseGeneratedOption.Identity)]\n    public int Id\n"
    ));
}

#[test]
fn test_properties_follow_ordinal_order() {
    let code = OutputGenerator::generate_class(&orders_model(), "Orders").unwrap();
    let id = code.find("public int Id\n").unwrap();
    let customer = code.find("public int CustomerId\n").unwrap();
    let notes = code.find("public string Notes\n").unwrap();
    assert!(id < customer && customer < notes);
}

#[test]
fn test_rendering_is_deterministic() {
    let model = orders_model();
    let first = OutputGenerator::generate_class(&model, "Orders").unwrap();
    let second = OutputGenerator::generate_class(&model, "Orders").unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());

    let rebuilt = OutputGenerator::generate_class(&orders_model(), "Orders").unwrap();
    assert_eq!(first, rebuilt);
}

#[test]
fn test_write_class_creates_directory_and_file() {
    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("nested").join("entities");

    let path = write_class(&orders_model(), &out_dir).unwrap();

    assert_eq!(path, out_dir.join("ClsOrders.cs"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(!bytes.starts_with(&[0xEF, 0xBB, 0xBF]), "file must not carry a BOM");
    let written = String::from_utf8(bytes).unwrap();
    assert_eq!(
        written,
        OutputGenerator::generate_class(&orders_model(), "Orders").unwrap()
    );
}

#[test]
fn test_write_class_overwrites_previous_output() {
    let tmp = TempDir::new().unwrap();
    let stale = tmp.path().join("ClsOrders.cs");
    std::fs::write(&stale, "stale contents that are much longer than nothing").unwrap();

    write_class(&orders_model(), tmp.path()).unwrap();

    let written = std::fs::read_to_string(&stale).unwrap();
    assert!(written.starts_with("// Auto-generated file.\n"));
    assert!(!written.contains("stale contents"));
}

#[test]
fn test_empty_model_reports_schema_not_found_and_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("out");
    let model = TableModel::new("dbo", "Ghost", vec![]);

    let err = write_class(&model, &out_dir).unwrap_err();

    assert!(matches!(err, GenError::SchemaNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!out_dir.exists());
}

#[test]
fn test_unusual_table_name_gives_valid_class_and_file_names() {
    let tmp = TempDir::new().unwrap();
    let model = TableModel::new(
        "public",
        "2024 sales-report",
        vec![Column::new("Línea Nº", "text", true, 1)],
    );

    let path = write_class(&model, tmp.path()).unwrap();
    let code = std::fs::read_to_string(&path).unwrap();

    assert_eq!(path.file_name().unwrap(), "Cls_2024SalesReport.cs");
    assert!(code.contains("public class Cls_2024SalesReport\n"));
    assert!(code.contains("    private string varLíneaNº;\n"));
    assert!(code.contains("    public string LíneaNº\n"));
    assert!(code.contains("//[Table(\"2024 sales-report\", Schema = \"public\")]"));
}

#[test]
fn test_write_to_unwritable_location_is_file_system_error() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let err = write_class(&orders_model(), &blocker).unwrap_err();

    assert!(matches!(err, GenError::FileSystem { .. }));
    assert_eq!(err.exit_code(), 99);
}

// Nothing listens on port 1, so connecting fails without a database server.
const UNREACHABLE_DB_URL: &str = "postgres://u:p@127.0.0.1:1/db";

fn orders_target() -> TableTarget {
    TableTarget {
        schema: "dbo".to_string(),
        table: "Orders".to_string(),
    }
}

#[tokio::test]
async fn test_load_model_connection_failure_is_data_access_error() {
    let err = load_model(UNREACHABLE_DB_URL, &orders_target())
        .await
        .unwrap_err();

    assert!(matches!(err, GenError::DataAccess(_)), "got {err:?}");
    assert_eq!(err.exit_code(), 99);
    assert!(err.to_string().starts_with("database error:"));
}

#[tokio::test]
async fn test_generate_class_connection_failure_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("generated");
    let config = AppConfig {
        db_url: UNREACHABLE_DB_URL.to_string(),
        output_dir: out_dir.clone(),
    };

    let err = generate_class(&config, &orders_target()).await.unwrap_err();

    assert!(matches!(err, GenError::DataAccess(_)), "got {err:?}");
    assert_eq!(err.exit_code(), 99);
    assert!(!out_dir.exists());
}
