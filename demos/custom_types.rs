use hetero_container::{types, ContainerError, Declared, HeteroContainer, Visit};

// Example element types: shapes with nothing in common
#[derive(Debug, Clone)]
struct Circle {
    radius: f64,
}

#[derive(Debug, Clone)]
struct Rect {
    width: f64,
    height: f64,
}

#[derive(Debug, Clone)]
struct Label(String);

/// Sums the area of every shape it sees
#[derive(Default)]
struct AreaVisitor {
    total: f64,
}

impl Visit<Circle> for AreaVisitor {
    fn visit(&mut self, circle: &mut Circle) {
        self.total += std::f64::consts::PI * circle.radius * circle.radius;
    }
}

impl Visit<Rect> for AreaVisitor {
    fn visit(&mut self, rect: &mut Rect) {
        self.total += rect.width * rect.height;
    }
}

impl Declared for AreaVisitor {
    type Accepts = (Circle, Rect);
}

/// Scales every shape in place
struct Scale(f64);

impl Visit<Circle> for Scale {
    fn visit(&mut self, circle: &mut Circle) {
        circle.radius *= self.0;
    }
}

impl Visit<Rect> for Scale {
    fn visit(&mut self, rect: &mut Rect) {
        rect.width *= self.0;
        rect.height *= self.0;
    }
}

fn main() -> Result<(), ContainerError> {
    let mut scene = HeteroContainer::new();
    scene.insert(Circle { radius: 1.0 });
    scene.insert(Rect {
        width: 2.0,
        height: 3.0,
    });
    scene.insert(Label("not a shape".to_string()));
    scene.insert(Circle { radius: 0.5 });

    println!("Scene holds {} values of types {:?}", scene.len(), scene.type_names());

    let mut area = AreaVisitor::default();
    scene.visit_declared(&mut area);
    println!("Total area: {:.3}", area.total);

    // Keep the unscaled scene around; the clone shares nothing with it
    let original = scene.clone();
    scene.visit(types::<(Circle, Rect)>(), &mut Scale(2.0));

    let mut scaled = AreaVisitor::default();
    scene.visit_declared(&mut scaled);
    println!("Total area after scaling: {:.3}", scaled.total);

    let first_radius = original.with_bucket(|circles: &[Circle]| circles[0].radius)?;
    println!("Original first circle radius: {}", first_radius);

    let labels = scene.with_bucket(|labels: &[Label]| {
        labels.iter().map(|label| label.0.clone()).collect::<Vec<_>>()
    })?;
    println!("Labels left untouched: {:?}", labels);

    // Asking for a type that was never inserted is reported, not a panic
    match scene.with_bucket(|values: &[u64]| values.len()) {
        Ok(count) => println!("Found {} u64 values", count),
        Err(e) => println!("Expected error: {}", e),
    }

    Ok(())
}
