use uuid::Uuid;

// time ordered, so ids sort by creation time in log search
pub fn random_id() -> String {
    Uuid::now_v7().simple().to_string()
}
