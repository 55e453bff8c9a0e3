use hetero_container::{
    closed_set, types, AnyContainer, AnyValue, ClosedSetContainer, ContainerError, CountVisitor,
    Dispatch, DoubleVisitor, HeteroContainer, RecordVisitor, Visit,
};

closed_set! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum Value {
        Int(i32),
        Float(f32),
        Letter(char),
        Text(String),
    }
}

/// Fills the same four values into each container
fn sample() -> (ClosedSetContainer<Value>, HeteroContainer, AnyContainer) {
    let mut closed = ClosedSetContainer::new();
    closed.insert(1i32);
    closed.insert(2.5f32);
    closed.insert('c');
    closed.insert("foo".to_string());

    let mut open = HeteroContainer::new();
    open.insert(1i32);
    open.insert(2.5f32);
    open.insert('c');
    open.insert("foo".to_string());

    let mut boxed = AnyContainer::new();
    boxed.push(1i32);
    boxed.push(2.5f32);
    boxed.push('c');
    boxed.push("foo".to_string());

    (closed, open, boxed)
}

/// Doubles numbers only, leaving letters and text alone
struct DoubleNumbers;

impl Visit<i32> for DoubleNumbers {
    fn visit(&mut self, value: &mut i32) {
        DoubleVisitor.visit(value);
    }
}

impl Visit<f32> for DoubleNumbers {
    fn visit(&mut self, value: &mut f32) {
        DoubleVisitor.visit(value);
    }
}

impl Visit<char> for DoubleNumbers {
    fn visit(&mut self, _value: &mut char) {}
}

impl Visit<String> for DoubleNumbers {
    fn visit(&mut self, _value: &mut String) {}
}

#[test]
fn test_all_containers_agree() {
    let (mut closed, mut open, mut boxed) = sample();
    let all = types::<(i32, f32, char, String)>();

    closed.visit(&mut DoubleNumbers);
    open.visit(types::<(i32, f32)>(), &mut DoubleVisitor);
    boxed.visit(types::<(i32, f32)>(), &mut DoubleVisitor);

    let mut from_closed = RecordVisitor::new();
    closed.visit(&mut from_closed);

    let mut from_open = RecordVisitor::new();
    open.visit(all, &mut from_open);

    let mut from_boxed = RecordVisitor::new();
    boxed.visit(all, &mut from_boxed);

    let expected = vec!["2", "5", "c", "foo"];
    assert_eq!(from_closed.lines, expected);
    assert_eq!(from_open.lines, expected);
    assert_eq!(from_boxed.lines, expected);
}

#[test]
fn test_closed_set_holds_tagged_values() {
    let (closed, _, _) = sample();

    assert_eq!(closed.len(), 4);
    assert_eq!(closed.get(0), Some(&Value::Int(1)));
    assert_eq!(closed.get(3), Some(&Value::Text("foo".to_string())));
    assert_eq!(closed.get(4), None);

    let letters = closed
        .iter()
        .filter(|value| matches!(value, Value::Letter(_)))
        .count();
    assert_eq!(letters, 1);
}

#[test]
fn test_single_tagged_value() {
    let mut value = Value::from(4i32);
    value.dispatch(&mut DoubleNumbers);
    assert_eq!(value, Value::Int(8));

    value = Value::from('q');
    value.dispatch(&mut DoubleNumbers);
    assert_eq!(value, Value::Letter('q'));

    let mut record = RecordVisitor::new();
    value = Value::from('z');
    value.dispatch(&mut record);
    assert_eq!(record.lines, vec!["z"]);
}

#[test]
fn test_boxed_order_differs_from_open_set_order() {
    let mut open = HeteroContainer::new();
    let mut boxed = AnyContainer::new();
    for (number, letter) in [(1i32, 'a'), (2, 'b')] {
        open.insert(number);
        open.insert(letter);
        boxed.push(number);
        boxed.push(letter);
    }

    let mut by_type = RecordVisitor::new();
    open.visit(types::<(i32, char)>(), &mut by_type);
    assert_eq!(by_type.lines, vec!["1", "2", "a", "b"]);

    let mut by_insertion = RecordVisitor::new();
    boxed.visit(types::<(i32, char)>(), &mut by_insertion);
    assert_eq!(by_insertion.lines, vec!["1", "a", "2", "b"]);
}

#[test]
fn test_boxed_values_clear_and_copy() -> Result<(), ContainerError> {
    let (_, _, mut boxed) = sample();
    let snapshot = boxed.clone();

    boxed.with_mut(3, |text: &mut String| text.push_str("bar"))?;
    boxed.clear();

    let mut count = CountVisitor::default();
    boxed.visit(types::<(i32, f32, char, String)>(), &mut count);
    assert_eq!(count.count, 0);

    assert_eq!(snapshot.len(), 4);
    assert_eq!(snapshot.with(3, |text: &String| text.clone())?, "foo");
    assert_eq!(
        snapshot.type_names(),
        vec!["i32", "f32", "char", "alloc::string::String"]
    );
    Ok(())
}

#[test]
fn test_any_value_standalone() {
    let mut value = AnyValue::new(2.5f32);
    assert!(value.is_type::<f32>());
    assert!(value.downcast_ref::<f64>().is_none());

    if let Some(float) = value.downcast_mut::<f32>() {
        *float *= 2.0;
    }
    assert_eq!(value.downcast::<f32>().ok(), Some(5.0));
}

#[test]
fn test_error_display() {
    let missing = ContainerError::TypeNotFound("char");
    let out_of_bounds = ContainerError::IndexOutOfBounds { index: 9, len: 4 };

    assert_eq!(format!("{}", missing), "No bucket for type char");
    assert_eq!(
        format!("{}", out_of_bounds),
        "Index 9 out of bounds (len 4)"
    );
    assert!(format!("{:?}", missing).contains("TypeNotFound"));
}
