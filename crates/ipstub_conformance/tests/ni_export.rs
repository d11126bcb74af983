//! Realistic IP-export wrappers: port tables, directions, widths and local
//! names.

use ipstub_conformance::{full_pipeline, make_config, run_pipeline};
use ipstub_entity::{parse_entity, Direction, PortKind, VectorOrder};

const ORDER_BOOK: &str = r#"-- VHDL wrapper for exported LabVIEW FPGA IP
library ieee;
use ieee.std_logic_1164.all;
use ieee.numeric_std.all;

entity NiFpgaIPWrapper_order_book is
    port (
        Clk40 : in std_logic;
        reset : in std_logic;
        enable_in : in std_logic;
        enable_out : out std_logic;
        enable_clr : in std_logic;
        ctrlind_00_Price : in std_logic_vector(31 downto 0);
        ctrlind_01_Quantity : in std_logic_vector(15 downto 0);
        ctrlind_02_Side : in std_logic;
        ctrlind_15_OrderBook_Command_Type : in std_logic_vector(7 downto 0);
        ctrlind_03_status : out std_logic_vector(0 to 3);
        ctrlind_04_Best_Bid : out std_logic_vector(31 downto 0);
        ctrlind_05_Valid : out std_logic
    );
end NiFpgaIPWrapper_order_book;

architecture vhdl_labview of NiFpgaIPWrapper_order_book is
begin
    -- instance : entity work.NiFpgaAG_order_book port map (...);
end vhdl_labview;
"#;

#[test]
fn order_book_wrapper_parses_cleanly() {
    let result = full_pipeline(ORDER_BOOK);
    assert!(result.diagnostics.is_empty(), "{:#?}", result.diagnostics);
    let entity = result.entity();
    assert_eq!(entity.name, "NiFpgaIPWrapper_order_book");
    assert_eq!(entity.len(), 12);
}

#[test]
fn key_order_is_declaration_order() {
    let entity = parse_entity(ORDER_BOOK).unwrap();
    assert_eq!(
        entity.declared_names(),
        vec![
            "Clk40",
            "reset",
            "enable_in",
            "enable_out",
            "enable_clr",
            "ctrlind_00_Price",
            "ctrlind_01_Quantity",
            "ctrlind_02_Side",
            "ctrlind_15_OrderBook_Command_Type",
            "ctrlind_03_status",
            "ctrlind_04_Best_Bid",
            "ctrlind_05_Valid",
        ]
    );
}

#[test]
fn descending_command_type_port() {
    let entity = parse_entity(ORDER_BOOK).unwrap();
    let port = entity.port("ctrlind_15_OrderBook_Command_Type").unwrap();
    assert_eq!(port.declared_name, "ctrlind_15_OrderBook_Command_Type");
    assert_eq!(port.direction, Direction::In);
    assert_eq!(port.kind(), PortKind::Vector);
    assert_eq!(port.vector_order(), Some(VectorOrder::Descending));
    assert_eq!(port.width(), Some(8));
    assert_eq!(port.local_name, "in_ip_orderbook_command_type");
}

#[test]
fn reset_is_a_plain_scalar() {
    let entity = parse_entity(ORDER_BOOK).unwrap();
    let port = entity.port("reset").unwrap();
    assert_eq!(port.local_name, "reset");
    assert_eq!(port.kind(), PortKind::Scalar);
}

#[test]
fn ascending_status_port() {
    let entity = parse_entity(ORDER_BOOK).unwrap();
    let port = entity.port("ctrlind_03_status").unwrap();
    assert_eq!(port.direction, Direction::Out);
    assert_eq!(port.vector_order(), Some(VectorOrder::Ascending));
    assert_eq!(port.width(), Some(4));
    assert_eq!(port.local_name, "out_ip_status");
}

#[test]
fn scalar_ports_have_no_vector_fields() {
    let entity = parse_entity(ORDER_BOOK).unwrap();
    for port in entity.iter().filter(|p| p.kind() == PortKind::Scalar) {
        assert_eq!(port.width(), None, "{}", port.declared_name);
        assert_eq!(port.vector_order(), None, "{}", port.declared_name);
    }
}

#[test]
fn downto_zero_width_is_n_plus_one() {
    for n in [0u32, 1, 7, 31, 63] {
        let text = format!("entity T is\n  port (\n    d : in std_logic_vector({n} downto 0)\n  );\nend T;\n");
        let entity = parse_entity(&text).unwrap();
        let port = entity.port("d").unwrap();
        assert_eq!(port.width(), Some(n + 1));
        assert_eq!(port.vector_order(), Some(VectorOrder::Descending));
    }
}

#[test]
fn zero_to_n_width_is_n_plus_one() {
    for n in [0u32, 3, 15] {
        let text = format!("entity T is\n  port (\n    d : out std_logic_vector(0 to {n})\n  );\nend T;\n");
        let entity = parse_entity(&text).unwrap();
        let port = entity.port("d").unwrap();
        assert_eq!(port.width(), Some(n + 1));
        assert_eq!(port.vector_order(), Some(VectorOrder::Ascending));
    }
}

#[test]
fn reparsing_gives_equal_tables() {
    let a = parse_entity(ORDER_BOOK).unwrap();
    let b = parse_entity(ORDER_BOOK).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.declared_names(), b.declared_names());
}

#[test]
fn only_first_entity_is_read() {
    let text = format!(
        "{ORDER_BOOK}\nentity Second is\n  port (\n    other : in std_logic\n  );\nend Second;\n"
    );
    let result = full_pipeline(&text);
    assert!(!result.has_errors());
    assert_eq!(result.entity().name, "NiFpgaIPWrapper_order_book");
    assert!(result.entity().port("other").is_none());
}

#[test]
fn no_entity_keyword_fails() {
    let result = full_pipeline("library ieee;\nuse ieee.std_logic_1164.all;\n");
    assert!(result.entity.is_none());
    assert_eq!(result.codes(), vec!["E102"]);
}

#[test]
fn custom_naming_from_config() {
    let config = make_config(
        r#"
[naming]
marker = "ctrlind"
input_prefix = "drv_"
output_prefix = "mon_"
"#,
    );
    let result = run_pipeline(ORDER_BOOK, &config);
    let entity = result.entity();
    assert_eq!(entity.port("ctrlind_00_Price").unwrap().local_name, "drv_price");
    assert_eq!(entity.port("ctrlind_05_Valid").unwrap().local_name, "mon_valid");
    assert_eq!(entity.port("Clk40").unwrap().local_name, "clk40");
}

#[test]
fn json_shape_of_port_table() {
    let entity = parse_entity(ORDER_BOOK).unwrap();
    let json = serde_json::to_value(&entity).unwrap();
    assert_eq!(json["name"], "NiFpgaIPWrapper_order_book");
    let status = &json["ports"]["ctrlind_03_status"];
    assert_eq!(status["local_name"], "out_ip_status");
    assert_eq!(status["kind"], "vector");
    assert_eq!(status["vector_order"], "ascending");
    assert_eq!(status["width"], 4);
}
