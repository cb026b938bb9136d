//! 터미널 출력 포맷팅 유틸리티
//!
//! 서버 시작 시 레지스트리 구성 과정을 출력하는 함수들입니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// 텍스트는 자동으로 중앙 정렬됩니다.
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║        🔄 INITIALIZING RESOURCE REGISTRY         ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^49}║", title);
    println!("╚{}╝", border);
}

/// `→ Step 1: Registering models`
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// `✓ Step 1: Models registered (2 items)`
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 트리 형태로 하위 작업 상태를 출력합니다
///
/// ```text
///    ├─ User: ✓ Registered
///    ├─ users: ✓ Registered (atomic)
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 레지스트리 구성 요약을 출력합니다
///
/// # Arguments
///
/// * `models` - 등록된 모델 수
/// * `entities` - 등록된 엔티티 수 (기본 엔티티 포함)
/// * `controllers` - 등록된 컨트롤러(라우트) 수
///
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║         🎉 RESOURCE REGISTRY INITIALIZED         ║
/// ╚══════════════════════════════════════════════════╝
///    📦 Models: 2
///    🗂️ Entities: 2
///    🔧 Controllers: 2
/// ```
pub fn print_registry_summary(models: usize, entities: usize, controllers: usize) {
    println!();
    print_boxed_title("🎉 RESOURCE REGISTRY INITIALIZED");
    println!("   📦 Models: {}", models);
    println!("   🗂️ Entities: {}", entities);
    println!("   🔧 Controllers: {}", controllers);
    println!();
}
