use common::model::pivot::Axis;

pub enum Msg {
    DropOnAxis { column: String, axis: Axis },
    SetAggregator(String),
    SetRenderer(String),
    SetValueField(String),
}
