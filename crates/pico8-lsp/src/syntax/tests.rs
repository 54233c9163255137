//! Tests for the structural reader

use super::ast::{ClauseKind, Node};
use super::parse;

/// (keyword, start line, end line) of each top-level node
fn outline(source: &str) -> Vec<(&'static str, u32, u32)> {
    parse(source)
        .chunk
        .body
        .iter()
        .map(|node| {
            let loc = node.loc().expect("reader always sets locations");
            (node.keyword(), loc.start.line, loc.end.line)
        })
        .collect()
}

// ============================================================================
// COMPOUND STATEMENTS
// ============================================================================

#[test]
fn test_if_clauses_and_locations() {
    let source = "if c1 then\n  print(1)\nelseif c2 then\n  print(2)\nelse\n  print(3)\nend";
    let parsed = parse(source);

    let Node::If(stmt) = &parsed.chunk.body[0] else {
        panic!("expected an if statement");
    };
    let loc = stmt.loc.unwrap();
    assert_eq!((loc.start.line, loc.end.line), (1, 7));

    let kinds: Vec<ClauseKind> = stmt.clauses.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![ClauseKind::If, ClauseKind::ElseIf, ClauseKind::Else]);

    let starts: Vec<u32> = stmt
        .clauses
        .iter()
        .map(|c| c.loc.unwrap().start.line)
        .collect();
    assert_eq!(starts, vec![1, 3, 5]);
}

#[test]
fn test_loops_and_do_blocks() {
    let source = "\
while true do
  a()
end
for i=1,10 do
  b()
end
for k,v in pairs(t) do
  c()
end
do
  d()
end
repeat
  e()
until done";

    assert_eq!(
        outline(source),
        vec![
            ("while", 1, 3),
            ("for", 4, 6),
            ("for", 7, 9),
            ("do", 10, 12),
            ("repeat", 13, 15),
        ]
    );

    let parsed = parse(source);
    assert!(matches!(parsed.chunk.body[1], Node::ForNumeric(_)));
    assert!(matches!(parsed.chunk.body[2], Node::ForGeneric(_)));
}

#[test]
fn test_loop_header_do_is_not_a_block() {
    let parsed = parse("while x do\n  y()\nend");
    let Node::While(block) = &parsed.chunk.body[0] else {
        panic!("expected a while loop");
    };
    assert!(block.body.is_empty());
}

#[test]
fn test_repeat_condition_spanning_lines() {
    let source = "repeat\n  x += 1\nuntil x > 10 and\n  y < 3\nprint(x)";
    assert_eq!(outline(source), vec![("repeat", 1, 4)]);
}

#[test]
fn test_repeat_condition_stops_at_next_statement() {
    let source = "repeat\n  step()\nuntil finished\nfunction f()\n  g()\nend";
    assert_eq!(outline(source), vec![("repeat", 1, 3), ("function", 4, 6)]);
}

// ============================================================================
// FUNCTIONS
// ============================================================================

#[test]
fn test_function_names() {
    let source = "\
function obj.mt:draw()
end
local function helper()
end
function _init()
end";
    let parsed = parse(source);
    let names: Vec<(Option<String>, bool)> = parsed
        .chunk
        .body
        .iter()
        .map(|node| match node {
            Node::Function(f) => (f.name.clone(), f.is_local),
            other => panic!("unexpected node {:?}", other),
        })
        .collect();

    assert_eq!(
        names,
        vec![
            (Some("obj.mt:draw".to_string()), false),
            (Some("helper".to_string()), true),
            (Some("_init".to_string()), false),
        ]
    );
}

#[test]
fn test_local_function_starts_at_local() {
    let source = "x = 1\nlocal function f()\n  return 1\nend";
    let parsed = parse(source);
    let loc = parsed.chunk.body[0].loc().unwrap();
    assert_eq!(loc.start.line, 2);
    assert_eq!(loc.start.column, 1);
}

#[test]
fn test_anonymous_functions_are_nodes() {
    let source = "add(actors, {\n  update = function(self)\n    self.x += 1\n  end\n})";
    let parsed = parse(source);
    let Node::Function(func) = &parsed.chunk.body[0] else {
        panic!("expected a function");
    };
    assert_eq!(func.name, None);
    let loc = func.loc.unwrap();
    assert_eq!((loc.start.line, loc.end.line), (2, 4));
}

#[test]
fn test_nested_blocks() {
    let source = "\
function my_func()
  if true then
    while true do
      print(\"hello\")
    end
  end
end";
    let parsed = parse(source);
    assert_eq!(parsed.chunk.node_count(), 3);

    let Node::Function(func) = &parsed.chunk.body[0] else {
        panic!("expected a function");
    };
    let Node::If(stmt) = &func.body[0] else {
        panic!("expected an if statement");
    };
    assert!(matches!(stmt.clauses[0].body[0], Node::While(_)));
}

// ============================================================================
// PICO-8 SHORTHAND AND RECOVERY
// ============================================================================

#[test]
fn test_shorthand_if_is_not_a_block() {
    let source = "if (btn(0)) x -= 1\nif (a) then\n  b()\nend";
    assert_eq!(outline(source), vec![("if", 2, 4)]);
}

#[test]
fn test_shorthand_while_is_not_a_block() {
    let source = "while (x < 5) x += 1\nprint(x)";
    assert!(outline(source).is_empty());
}

#[test]
fn test_parenthesised_condition_with_operator_is_not_shorthand() {
    let source = "if (a) == b then\n  c()\nend";
    assert_eq!(outline(source), vec![("if", 1, 3)]);
}

#[test]
fn test_stray_end_is_skipped() {
    let source = "end\nfunction f()\n  g()\nend";
    assert_eq!(outline(source), vec![("function", 2, 4)]);
}

#[test]
fn test_unterminated_block_ends_at_last_token() {
    let source = "function f()\n  g()\n";
    assert_eq!(outline(source), vec![("function", 1, 2)]);
}

#[test]
fn test_block_keywords_in_comments_and_strings_are_ignored() {
    let source = "-- if this then\ns = \"while\"\n--[[ do\nend ]]\nt = [[repeat]]";
    assert!(outline(source).is_empty());
}

// ============================================================================
// COMMENTS
// ============================================================================

#[test]
fn test_comment_raw_and_value() {
    let source = "-- hello world  \n-->8\n--[[ block\ncomment ]]\n--[=[ ]] ]=]";
    let comments = parse(source).comments;

    let pairs: Vec<(&str, &str)> = comments
        .iter()
        .map(|c| (c.raw.as_str(), c.value.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("-- hello world  ", "hello world"),
            ("-->8", ">8"),
            ("--[[ block\ncomment ]]", "block\ncomment"),
            ("--[=[ ]] ]=]", "]]"),
        ]
    );

    let lines: Vec<(u32, u32)> = comments
        .iter()
        .map(|c| (c.loc.start.line, c.loc.end.line))
        .collect();
    assert_eq!(lines, vec![(1, 1), (2, 2), (3, 4), (5, 5)]);
}

#[test]
fn test_region_comment_value() {
    let comments = parse("local a = 1 -- #region  Player  ").comments;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].value, "#region  Player");
}
