table! {
    attendance_records (id) {
        id -> Integer,
        student -> Integer,
        class -> Integer,
        lecture -> Integer,
        timestamp -> Timestamp,
        status -> Text,
        verification_method -> Text,
    }
}

table! {
    classes (id) {
        id -> Integer,
        teacher -> Integer,
        name -> Text,
        department -> Text,
        year -> Integer,
    }
}

table! {
    lectures (id) {
        id -> Integer,
        class -> Integer,
        title -> Text,
        date -> Date,
        qr_code -> Nullable<Text>,
    }
}

table! {
    sessions (id) {
        id -> Integer,
        token -> Text,
        student -> Nullable<Integer>,
        teacher -> Nullable<Integer>,
        created_at -> Timestamp,
    }
}

table! {
    students (id) {
        id -> Integer,
        email -> Text,
        password_digest -> Text,
        full_name -> Text,
        roll_number -> Text,
        department -> Text,
        year -> Integer,
        face_image -> Nullable<Text>,
        face_registered -> Bool,
    }
}

table! {
    teachers (id) {
        id -> Integer,
        email -> Text,
        password_digest -> Text,
        full_name -> Text,
        department -> Text,
        subjects -> Nullable<Text>,
    }
}

joinable!(attendance_records -> students (student));
joinable!(attendance_records -> classes (class));
joinable!(attendance_records -> lectures (lecture));
joinable!(classes -> teachers (teacher));
joinable!(lectures -> classes (class));

allow_tables_to_appear_in_same_query!(
    attendance_records,
    classes,
    lectures,
    sessions,
    students,
    teachers,
);
