use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use snapcode_core::{GenCodeRequest, MemberDescriptor, ObjectCodeGenerator, ObjectGraph, Scalar, Settings, Value};

fn gen_with(root: &Value, graph: &ObjectGraph, settings: Settings) -> String {
    let request = GenCodeRequest::new(settings);
    ObjectCodeGenerator::new(root, graph, &request)
        .gen_code()
        .expect("generation should succeed")
}

fn person_graph() -> (ObjectGraph, Value) {
    let mut g = ObjectGraph::new();
    g.setter("Person", "name", "java.lang.String");
    g.setter("Person", "age", "int");
    let p = g.record("com.example.Person");
    g.field(p, MemberDescriptor::new("name", "String").restricted(), "Ann");
    g.field(p, MemberDescriptor::new("_age", "int").primitive().restricted(), 30);
    g.field(p, MemberDescriptor::new("secret", "String").restricted(), "hidden");
    g.field(p, MemberDescriptor::new("ID", "String").constant(), "P-1");
    (g, Value::Ref(p))
}

#[test]
fn restricted_members_use_setters_and_others_are_dropped() {
    let (g, root) = person_graph();
    let out = gen_with(&root, &g, Settings::default());
    assert_eq!(
        out,
        "Person person = new Person();\nperson.setName(\"Ann\");\nperson.setAge(30);\n"
    );
    assert!(!out.contains("secret"));
    assert!(!out.contains("ID"));
}

#[test]
fn underscore_members_need_support_underscores() {
    let (g, root) = person_graph();
    let out = gen_with(&root, &g, Settings::default().with_support_underscores(false));
    assert_eq!(out, "Person person = new Person();\nperson.setName(\"Ann\");\n");
}

#[test]
fn stripped_underscore_name_names_the_value() {
    let mut g = ObjectGraph::new();
    g.setter("Person", "home", "Address");
    let p = g.record("Person");
    let addr = g.record("Address");
    g.field(p, MemberDescriptor::new("_home", "Address").restricted(), addr);

    let out = gen_with(&Value::Ref(p), &g, Settings::default());
    assert_eq!(
        out,
        "Address home = new Address();\n\nPerson person = new Person();\nperson.setHome(home);\n"
    );
}

#[test]
fn setter_is_inherited_from_supertype() {
    let mut g = ObjectGraph::new();
    g.declare_type("Employee", &["Person"]);
    g.setter("Person", "name", "String");
    let e = g.record("Employee");
    g.field(e, MemberDescriptor::new("name", "String").restricted(), "Bo");

    let out = gen_with(&Value::Ref(e), &g, Settings::default());
    assert_eq!(out, "Employee employee = new Employee();\nemployee.setName(\"Bo\");\n");
}

#[test]
fn setter_with_wrong_parameter_type_is_ignored() {
    let mut g = ObjectGraph::new();
    g.setter("Tag", "label", "Integer");
    let t = g.record("Tag");
    g.field(t, MemberDescriptor::new("label", "String"), "x");

    let out = gen_with(&Value::Ref(t), &g, Settings::default());
    assert_eq!(out, "Tag tag = new Tag();\ntag.label = \"x\";\n");
}

#[test]
fn anonymous_type_is_declared_through_its_supertype() {
    let mut g = ObjectGraph::new();
    g.declare_type("com.acme.Main$1", &["java.lang.Runnable"]);
    let task = g.record("com.acme.Main$1");

    let out = gen_with(&Value::Ref(task), &g, Settings::default());
    assert_eq!(out, "Runnable object = new Runnable() {/* anonymous class */};\n");
}

#[test]
fn nested_type_uses_dotted_name() {
    let mut g = ObjectGraph::new();
    let entry = g.record("com.acme.Outer$Inner");

    let out = gen_with(&Value::Ref(entry), &g, Settings::default());
    assert_eq!(out, "Outer.Inner inner = new Outer.Inner();\n");
}

#[test]
fn special_scalars_render_as_constructor_literals() {
    let mut g = ObjectGraph::new();
    let task = g.record("Task");
    let state = Scalar::Enum {
        type_name: "com.x.State".to_string(),
        constant: "DONE".to_string(),
    };
    let due = Scalar::Date(Utc.timestamp_millis_opt(1000).unwrap());
    let price = Scalar::Decimal(Decimal::from_str("12.50").unwrap());
    g.field(task, MemberDescriptor::new("state", "State"), state);
    g.field(task, MemberDescriptor::new("due", "Date"), due);
    g.field(task, MemberDescriptor::new("price", "BigDecimal"), price);
    g.field(task, MemberDescriptor::new("size", "long").primitive(), 7i64);

    let out = gen_with(&Value::Ref(task), &g, Settings::default());
    assert_eq!(
        out,
        "Task task = new Task();\n\
         task.state = State.DONE;\n\
         task.due = new Date(1000);\n\
         task.price = new BigDecimal(\"12.50\");\n\
         task.size = 7L;\n"
    );
}
