use raylib::prelude::{Rectangle, Vector2};

pub fn vec2(x: f32, y: f32) -> Vector2 {
    Vector2 { x, y }
}

pub fn vec2_add(a: Vector2, b: Vector2) -> Vector2 {
    vec2(a.x + b.x, a.y + b.y)
}

pub fn vec2_sub(a: Vector2, b: Vector2) -> Vector2 {
    vec2(a.x - b.x, a.y - b.y)
}

pub fn vec2_scale(v: Vector2, s: f32) -> Vector2 {
    vec2(v.x * s, v.y * s)
}

pub fn vec2_length(v: Vector2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

pub fn vec2_distance(a: Vector2, b: Vector2) -> f32 {
    vec2_length(vec2_sub(a, b))
}

pub fn vec2_distance_sq(a: Vector2, b: Vector2) -> f32 {
    let d = vec2_sub(a, b);
    d.x * d.x + d.y * d.y
}

pub fn centered_rect(center: Vector2, width: f32, height: f32) -> Rectangle {
    Rectangle {
        x: center.x - width * 0.5,
        y: center.y - height * 0.5,
        width,
        height,
    }
}

pub fn rect_center(rect: &Rectangle) -> Vector2 {
    vec2(rect.x + rect.width * 0.5, rect.y + rect.height * 0.5)
}

pub fn point_in_rect(pos: Vector2, rect: &Rectangle) -> bool {
    pos.x >= rect.x
        && pos.x <= rect.x + rect.width
        && pos.y >= rect.y
        && pos.y <= rect.y + rect.height
}

pub fn rects_overlap(a: &Rectangle, b: &Rectangle) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}
