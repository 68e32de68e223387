// ==========================================
// 区间统计集成测试
// ==========================================
// 测试范围:
// 1. 空区间: total_rolls = 0，其余字段为 None
// 2. 典型场景: 均值/极值/按日极值日期
// 3. 区间边界（闭区间）与区间外数据排除
// 4. 并列时取最早日期
// 5. 重复调用结果一致；软删除不影响按入库日期的统计
// ==========================================


use roll_stock::RollStatistics;
use test_helpers::*;

#[test]
fn test_statistics_空区间() {
    let env = TestEnv::new().expect("无法创建测试环境");
    env.add_roll(10.0, 5.0, day(2024, 1, 1));

    let stats = env
        .state
        .roll_api
        .get_statistics(day(2025, 1, 1), day(2025, 12, 31))
        .expect("统计失败");

    assert_eq!(
        stats,
        RollStatistics {
            total_rolls: 0,
            average_length: None,
            average_weight: None,
            max_length: None,
            min_length: None,
            max_weight: None,
            min_weight: None,
            min_count_date: None,
            max_count_date: None,
            min_weight_date: None,
            max_weight_date: None,
        }
    );
}

#[test]
fn test_statistics_典型场景() {
    let env = TestEnv::new().expect("无法创建测试环境");
    let day1 = day(2024, 4, 1);
    let day2 = day(2024, 4, 2);

    env.add_roll(10.0, 5.0, day1);
    env.add_roll(20.0, 15.0, day1);
    env.add_roll(30.0, 25.0, day2);

    let stats = env.state.roll_api.get_statistics(day1, day2).expect("统计失败");

    assert_eq!(stats.total_rolls, 3);
    assert_eq!(stats.average_length, Some(20.0));
    assert_eq!(stats.average_weight, Some(15.0));
    assert_eq!(stats.max_length, Some(30.0));
    assert_eq!(stats.min_length, Some(10.0));
    assert_eq!(stats.max_weight, Some(25.0));
    assert_eq!(stats.min_weight, Some(5.0));

    // day1: 2 卷 / 总重 20，day2: 1 卷 / 总重 25
    assert_eq!(stats.min_count_date, Some(day2));
    assert_eq!(stats.max_count_date, Some(day1));
    assert_eq!(stats.min_weight_date, Some(day1));
    assert_eq!(stats.max_weight_date, Some(day2));
}

#[test]
fn test_statistics_区间边界() {
    let env = TestEnv::new().expect("无法创建测试环境");
    env.add_roll(1.0, 1.0, day(2024, 4, 30));
    env.add_roll(2.0, 2.0, day(2024, 5, 1));
    env.add_roll(3.0, 3.0, day(2024, 5, 31));
    env.add_roll(4.0, 4.0, day(2024, 6, 1));

    let stats = env
        .state
        .roll_api
        .get_statistics(day(2024, 5, 1), day(2024, 5, 31))
        .expect("统计失败");

    assert_eq!(stats.total_rolls, 2);
    assert_eq!(stats.min_length, Some(2.0));
    assert_eq!(stats.max_length, Some(3.0));
}

#[test]
fn test_statistics_并列取最早日期() {
    let env = TestEnv::new().expect("无法创建测试环境");
    let (d1, d2, d3) = (day(2024, 9, 1), day(2024, 9, 2), day(2024, 9, 3));

    // 三天各一卷且总重相同
    env.add_roll(1.0, 10.0, d3);
    env.add_roll(1.0, 10.0, d2);
    env.add_roll(1.0, 10.0, d1);

    let stats = env.state.roll_api.get_statistics(d1, d3).expect("统计失败");
    assert_eq!(stats.min_count_date, Some(d1));
    assert_eq!(stats.max_count_date, Some(d1));
    assert_eq!(stats.min_weight_date, Some(d1));
    assert_eq!(stats.max_weight_date, Some(d1));
}

#[test]
fn test_statistics_幂等() {
    let env = TestEnv::new().expect("无法创建测试环境");
    let roll = env.add_roll(7.0, 3.0, day(2024, 10, 1));
    env.add_roll(9.0, 4.0, day(2024, 10, 2));
    let api = &env.state.roll_api;

    let first = api.get_statistics(day(2024, 10, 1), day(2024, 10, 31)).expect("统计失败");
    let second = api.get_statistics(day(2024, 10, 1), day(2024, 10, 31)).expect("统计失败");
    assert_eq!(first, second);

    // 出库不改变入库日期，因此统计不变
    api.soft_delete_roll(roll.id).expect("出库失败");
    let third = api.get_statistics(day(2024, 10, 1), day(2024, 10, 31)).expect("统计失败");
    assert_eq!(first, third);

    api.hard_delete_roll(roll.id).expect("删除失败");
    let fourth = api.get_statistics(day(2024, 10, 1), day(2024, 10, 31)).expect("统计失败");
    assert_eq!(fourth.total_rolls, 1);
    assert_eq!(fourth.min_count_date, Some(day(2024, 10, 2)));
}

#[test]
fn test_statistics_serialized_shape() {
    let env = TestEnv::new().expect("无法创建测试环境");
    env.add_roll(5.0, 2.0, day(2024, 11, 11));

    let stats = env
        .state
        .roll_api
        .get_statistics(day(2024, 11, 1), day(2024, 11, 30))
        .expect("统计失败");
    let json = serde_json::to_value(&stats).expect("序列化失败");

    assert_eq!(json["total_rolls"], 1);
    assert_eq!(json["average_length"], 5.0);
    assert_eq!(json["max_weight_date"], "2024-11-11");
}
