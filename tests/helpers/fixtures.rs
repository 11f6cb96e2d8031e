//! Catalog fixture seeding for integration tests.
//!
//! Ids are chosen by the caller so tests can assert against them
//! without round-tripping through lookups.

use sqlx::SqlitePool;

pub async fn institution(pool: &SqlitePool, id: i64, name: &str) {
    sqlx::query("INSERT INTO institutions (id, name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await
        .expect("failed to insert institution");
}

pub async fn academic_year(pool: &SqlitePool, id: i64, institution_id: i64, name: &str) {
    sqlx::query(
        "INSERT INTO academic_years (id, institution_id, name, starts_on, ends_on)
         VALUES (?, ?, ?, '2024-09-01T00:00:00+00:00', '2025-06-30T00:00:00+00:00')",
    )
    .bind(id)
    .bind(institution_id)
    .bind(name)
    .execute(pool)
    .await
    .expect("failed to insert academic year");
}

pub async fn semester(pool: &SqlitePool, id: i64, academic_year_id: i64, name: &str) {
    sqlx::query("INSERT INTO semesters (id, academic_year_id, name) VALUES (?, ?, ?)")
        .bind(id)
        .bind(academic_year_id)
        .bind(name)
        .execute(pool)
        .await
        .expect("failed to insert semester");
}

pub async fn program(pool: &SqlitePool, id: i64, institution_id: i64, name: &str) {
    sqlx::query("INSERT INTO programs (id, institution_id, name) VALUES (?, ?, ?)")
        .bind(id)
        .bind(institution_id)
        .bind(name)
        .execute(pool)
        .await
        .expect("failed to insert program");
}

pub async fn class(
    pool: &SqlitePool,
    id: i64,
    program_id: i64,
    academic_year_id: i64,
    semester_id: Option<i64>,
    name: &str,
) {
    sqlx::query(
        "INSERT INTO classes (id, program_id, academic_year_id, semester_id, name)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(program_id)
    .bind(academic_year_id)
    .bind(semester_id)
    .bind(name)
    .execute(pool)
    .await
    .expect("failed to insert class");
}

pub async fn course(pool: &SqlitePool, id: i64, name: &str) {
    sqlx::query("INSERT INTO courses (id, name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await
        .expect("failed to insert course");
}

pub async fn class_course(pool: &SqlitePool, id: i64, class_id: i64, course_id: i64) {
    sqlx::query("INSERT INTO class_courses (id, class_id, course_id) VALUES (?, ?, ?)")
        .bind(id)
        .bind(class_id)
        .bind(course_id)
        .execute(pool)
        .await
        .expect("failed to insert class course");
}

pub async fn enroll(pool: &SqlitePool, class_course_id: i64, student_name: &str) {
    sqlx::query("INSERT INTO enrollments (class_course_id, student_name) VALUES (?, ?)")
        .bind(class_course_id)
        .bind(student_name)
        .execute(pool)
        .await
        .expect("failed to insert enrollment");
}

pub async fn exam_type(pool: &SqlitePool, id: i64, institution_id: i64, name: &str) {
    sqlx::query("INSERT INTO exam_types (id, institution_id, name) VALUES (?, ?, ?)")
        .bind(id)
        .bind(institution_id)
        .bind(name)
        .execute(pool)
        .await
        .expect("failed to insert exam type");
}

pub async fn profile(pool: &SqlitePool, id: i64, institution_id: i64, display_name: &str) {
    sqlx::query("INSERT INTO profiles (id, institution_id, display_name) VALUES (?, ?, ?)")
        .bind(id)
        .bind(institution_id)
        .bind(display_name)
        .execute(pool)
        .await
        .expect("failed to insert profile");
}

/// Seed the standard two-class institution used by the scheduler tests:
/// institution 1 / year 1 / semester 1, program 1, classes 10 ("CS-A")
/// and 11 ("CS-B"), one class-course each (100 -> Algebra, 101 ->
/// Physics), both with enrolled students, exam type 1 "Midterm",
/// profile 5.
pub async fn standard_campus(pool: &SqlitePool) {
    institution(pool, 1, "Polytechnic").await;
    academic_year(pool, 1, 1, "2024/2025").await;
    semester(pool, 1, 1, "Winter").await;
    program(pool, 1, 1, "Computer Science").await;
    class(pool, 10, 1, 1, Some(1), "CS-A").await;
    class(pool, 11, 1, 1, Some(1), "CS-B").await;
    course(pool, 20, "Algebra").await;
    course(pool, 21, "Physics").await;
    class_course(pool, 100, 10, 20).await;
    class_course(pool, 101, 11, 21).await;
    enroll(pool, 100, "Ada").await;
    enroll(pool, 100, "Grace").await;
    enroll(pool, 101, "Linus").await;
    exam_type(pool, 1, 1, "Midterm").await;
    profile(pool, 5, 1, "Registrar").await;
}
