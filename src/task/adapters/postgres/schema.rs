//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Account records referenced by categories, tags and tasks.
    users (id) {
        /// User identifier.
        id -> Int8,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Email address.
        #[max_length = 255]
        email -> Varchar,
    }
}

diesel::table! {
    /// Task categories owned by a user.
    categories (id) {
        /// Category identifier.
        id -> Int8,
        /// Category name.
        #[max_length = 255]
        name -> Varchar,
        /// Owning user.
        user_id -> Int8,
    }
}

diesel::table! {
    /// Tags owned by a user.
    tags (id) {
        /// Tag identifier.
        id -> Int8,
        /// Tag name.
        #[max_length = 255]
        name -> Varchar,
        /// Owning user.
        user_id -> Int8,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Int8,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Owning user.
        user_id -> Int8,
        /// Category the task belongs to.
        category_id -> Int8,
        /// Completion flag.
        done -> Bool,
        /// Cancellation timestamp.
        canceled_at -> Nullable<Timestamptz>,
        /// Optional location latitude.
        location_latitude -> Nullable<Float8>,
        /// Optional location longitude.
        location_longitude -> Nullable<Float8>,
        /// Optional location name.
        #[max_length = 255]
        location_name -> Nullable<Varchar>,
        /// Optional location description.
        location_description -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered task-to-tag associations.
    task_tags (task_id, tag_id) {
        /// Associated task.
        task_id -> Int8,
        /// Associated tag.
        tag_id -> Int8,
        /// Position of the tag within the task's tag list.
        position -> Int4,
    }
}

diesel::joinable!(categories -> users (user_id));
diesel::joinable!(tags -> users (user_id));
diesel::joinable!(tasks -> users (user_id));
diesel::joinable!(tasks -> categories (category_id));
diesel::joinable!(task_tags -> tasks (task_id));
diesel::joinable!(task_tags -> tags (tag_id));

diesel::allow_tables_to_appear_in_same_query!(categories, tags, task_tags, tasks, users);
